//! The publish loop: pose lookup, crop request, one RGB + depth + transform
//! per tick.

use crate::config::NodeConfig;
use crate::generator::AerialProvider;
use crate::geo::GeoReference;
use crate::pose::PoseSource;
use crate::sink::MessageSink;
use crate::Error;
use log::warn;
use ros2_builtin_interfaces::msg::Time;
use ros2_geometry_msgs::msg::TransformStamped;
use ros2_sensor_msgs::msg::Image;
use ros2_std_msgs::msg::Header;
use ros2_tf2_msgs::msg::TFMessage;

/// What one tick ended up publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// RGB, depth and transform all published.
    Published,
    /// Requested coordinate was outside the map data; depth and transform
    /// published, RGB skipped.
    NoRgb,
    /// Pose not available; nothing published this tick.
    NoPose,
}

pub struct AerialViewPublisher<G, P, S> {
    config: NodeConfig,
    geo: GeoReference,
    generator: G,
    pose: P,
    sink: S,
    /// Constant 32FC1 fill, computed once at startup.
    depth_data: Vec<u8>,
}

impl<G, P, S> AerialViewPublisher<G, P, S>
where
    G: AerialProvider,
    P: PoseSource,
    S: MessageSink,
{
    pub fn new(config: NodeConfig, generator: G, pose: P, sink: S) -> Result<Self, Error> {
        config.validate()?;

        let pixels = config.image_width as usize * config.image_height as usize;
        let mut depth_data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            depth_data.extend_from_slice(&config.constant_depth_value.to_le_bytes());
        }

        let geo = GeoReference {
            lat: config.geo_origin_lat,
            lon: config.geo_origin_lon,
        };

        Ok(AerialViewPublisher {
            config,
            geo,
            generator,
            pose,
            sink,
            depth_data,
        })
    }

    /// One publish cycle. Transient conditions (pose unavailable, crop out
    /// of bounds) are logged and absorbed; only sink failures surface.
    pub fn tick(&mut self, stamp: Time) -> Result<TickOutcome, Error> {
        // 1. Pose snapshot; without one this tick publishes nothing.
        let pose = match self.pose.lookup(stamp) {
            Ok(pose) => pose,
            Err(e) => {
                warn!("Skipping tick: {}", e);
                return Ok(TickOutcome::NoPose);
            }
        };

        // 2. Planar position to geographic coordinate. The crop stays
        //    axis-aligned, pointing straight down; yaw is ignored.
        let (lat, lon) = self.geo.offset_to_geo(pose.position.x, pose.position.y);

        // 3. Request the crop. Out of bounds skips only the RGB output.
        let rgb = match self.generator.request_crop(
            lat,
            lon,
            self.config.image_width,
            self.config.image_height,
        ) {
            Ok(crop) => Some(crop),
            Err(e) => {
                warn!("No RGB image this tick: {}", e);
                None
            }
        };

        let sensor_header = Header::new(stamp, &self.config.sensor_frame);

        // 4. + 5. Publish everything with the same stamp.
        let published_rgb = rgb.is_some();
        if let Some(crop) = rgb {
            let rgb_msg = Image::new(
                sensor_header.clone(),
                self.config.image_height,
                self.config.image_width,
                "rgb8".to_owned(),
                self.config.image_width * 3,
                crop.into_raw(),
            );
            self.sink.publish_rgb(&rgb_msg)?;
        }

        let depth_msg = Image::new(
            sensor_header,
            self.config.image_height,
            self.config.image_width,
            "32FC1".to_owned(),
            self.config.image_width * 4,
            self.depth_data.clone(),
        );
        self.sink.publish_depth(&depth_msg)?;

        let tf = TFMessage {
            transforms: vec![TransformStamped {
                header: Header::new(stamp, &self.config.map_frame),
                child_frame_id: self.config.sensor_frame.clone(),
                transform: pose.into(),
            }],
        };
        self.sink.broadcast(&tf)?;

        Ok(if published_rgb {
            TickOutcome::Published
        } else {
            TickOutcome::NoRgb
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn pose_mut(&mut self) -> &mut P {
        &mut self.pose
    }

    /// Tear down, handing the sink back for finalization.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
