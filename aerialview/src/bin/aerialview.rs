use aerialview::generator::BasemapGenerator;
use aerialview::geo::GeoReference;
use aerialview::pose::UavKinematics;
use aerialview::sink::McapSink;
use aerialview::{AerialViewPublisher, Error, NodeConfig};
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use ros2_builtin_interfaces::msg::Time;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "Publish simulated aerial RGB and depth images \
and the map -> sensor transform, recorded as a rosbag2-compatible MCAP file.")]
struct Cli {
    /// Georeferenced basemap image, anchored at the geographic origin.
    #[arg(short, long)]
    basemap: PathBuf,

    /// Output MCAP recording path.
    #[arg(short, long, default_value = "aerialview.mcap")]
    output: PathBuf,

    /// Topic for the RGB aerial image.
    #[arg(long, default_value = "/aerialview/rgb")]
    rgb_topic: String,

    /// Topic for the constant-value depth image.
    #[arg(long, default_value = "/aerialview/depth")]
    depth_topic: String,

    /// Reference frame of the published transform.
    #[arg(long, default_value = "map")]
    map_frame: String,

    /// Sensor frame name, child of the map frame.
    #[arg(long, default_value = "flying_sensor")]
    sensor_frame: String,

    /// Width of both published images, pixels.
    #[arg(long, default_value_t = 512)]
    image_width: u32,

    /// Height of both published images, pixels.
    #[arg(long, default_value_t = 512)]
    image_height: u32,

    /// Tick frequency, Hz.
    #[arg(long, default_value_t = 10.0)]
    publish_rate_hz: f64,

    /// Latitude of the planar origin, degrees.
    #[arg(long)]
    geo_origin_lat: f64,

    /// Longitude of the planar origin, degrees.
    #[arg(long)]
    geo_origin_lon: f64,

    /// Ground resolution of the basemap, meters per pixel.
    #[arg(long, default_value_t = 0.25)]
    meters_per_pixel: f64,

    /// Uniform depth image fill value.
    #[arg(long, default_value_t = 50.0)]
    constant_depth_value: f32,

    /// Stop after this many seconds. Runs until Ctrl+C when unset.
    #[arg(long)]
    duration_secs: Option<f64>,

    /// Half-size of the square patrol pattern around the origin, meters.
    #[arg(long, default_value_t = 100.0)]
    patrol_radius: f64,

    /// Maximum UAV speed, m/s.
    #[arg(long, default_value_t = 8.0)]
    max_speed: f64,

    /// Flight altitude, meters.
    #[arg(long, default_value_t = 50.0)]
    altitude: f64,
}

fn run(cli: &Cli, sigint: Arc<AtomicBool>) -> Result<(), Error> {
    let config = NodeConfig {
        rgb_topic: cli.rgb_topic.clone(),
        depth_topic: cli.depth_topic.clone(),
        map_frame: cli.map_frame.clone(),
        sensor_frame: cli.sensor_frame.clone(),
        image_width: cli.image_width,
        image_height: cli.image_height,
        publish_rate_hz: cli.publish_rate_hz,
        geo_origin_lat: cli.geo_origin_lat,
        geo_origin_lon: cli.geo_origin_lon,
        meters_per_pixel: cli.meters_per_pixel,
        constant_depth_value: cli.constant_depth_value,
    };
    config.validate()?;

    let anchor = GeoReference {
        lat: config.geo_origin_lat,
        lon: config.geo_origin_lon,
    };
    let generator = BasemapGenerator::open(&cli.basemap, anchor, config.meters_per_pixel)?;
    info!("Basemap loaded: {}", cli.basemap.display());

    let sink = McapSink::create(&cli.output, &config.rgb_topic, &config.depth_topic)?;
    info!("Recording to: {}", cli.output.display());

    // Square patrol around the origin at the configured altitude
    let r = cli.patrol_radius;
    let waypoints = [
        [r, r, cli.altitude],
        [-r, r, cli.altitude],
        [-r, -r, cli.altitude],
        [r, -r, cli.altitude],
    ];
    let mut leg = 0;
    let mut uav = UavKinematics::new([0.0, 0.0, cli.altitude], cli.max_speed);
    uav.set_target(waypoints[leg]);

    let interval = config.tick_interval();
    let mut node = AerialViewPublisher::new(config, generator, uav, sink)?;

    let started = Instant::now();
    while !sigint.load(Ordering::Relaxed) {
        if let Some(limit) = cli.duration_secs {
            if started.elapsed().as_secs_f64() >= limit {
                info!("Run duration reached");
                break;
            }
        }
        std::thread::sleep(interval);

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System clock is set before the Unix epoch");
        let stamp = Time::from_nanos(now.as_nanos() as u64);

        // Per-tick failures keep the loop alive
        if let Err(e) = node.tick(stamp) {
            error!("Tick failed: {}", e);
        }

        if node.pose_mut().at_target() {
            leg = (leg + 1) % waypoints.len();
            node.pose_mut().set_target(waypoints[leg]);
            info!("Heading for waypoint {:?}", waypoints[leg]);
        }
    }

    node.into_sink().finish()?;
    Ok(())
}

fn main() {
    // Logger setup
    let log_env = Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::init_from_env(log_env);

    // Catch SIGINT
    let sigint = Arc::new(AtomicBool::new(false));
    let handler_sigint = sigint.clone();
    ctrlc::set_handler(move || {
        warn!("received Ctrl+C! Shutting down.");
        handler_sigint.store(true, Ordering::Relaxed);
    })
    .expect("Error setting Ctrl-C handler");

    let cli = Cli::parse();

    match run(&cli, sigint) {
        Ok(_) => {
            info!("Done.");
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
