//! Publish-cycle behavior, driven tick by tick with synthetic stamps and an
//! in-memory sink.

use aerialview::generator::{AerialProvider, CropError};
use aerialview::pose::{PoseSource, PoseUnavailable};
use aerialview::sink::MessageSink;
use aerialview::{AerialViewPublisher, Error, NodeConfig, TickOutcome};
use image::{Rgb, RgbImage};
use ros2_builtin_interfaces::msg::Time;
use ros2_geometry_msgs::msg::{Point, Pose};
use ros2_sensor_msgs::msg::Image;
use ros2_tf2_msgs::msg::TFMessage;

#[derive(Default)]
struct MemorySink {
    rgb: Vec<Image>,
    depth: Vec<Image>,
    tf: Vec<TFMessage>,
}

impl MessageSink for MemorySink {
    fn publish_rgb(&mut self, image: &Image) -> Result<(), Error> {
        self.rgb.push(image.clone());
        Ok(())
    }

    fn publish_depth(&mut self, image: &Image) -> Result<(), Error> {
        self.depth.push(image.clone());
        Ok(())
    }

    fn broadcast(&mut self, tf: &TFMessage) -> Result<(), Error> {
        self.tf.push(tf.clone());
        Ok(())
    }
}

/// Records every requested coordinate; optionally reports the coordinate as
/// outside the map data.
#[derive(Default)]
struct ScriptedGenerator {
    requests: Vec<(f64, f64, u32, u32)>,
    out_of_bounds: bool,
}

impl AerialProvider for ScriptedGenerator {
    fn request_crop(
        &mut self,
        lat: f64,
        lon: f64,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, CropError> {
        self.requests.push((lat, lon, width, height));
        if self.out_of_bounds {
            Err(CropError::OutOfBounds(lat, lon))
        } else {
            Ok(RgbImage::from_pixel(width, height, Rgb([10, 20, 30])))
        }
    }
}

struct StaticPose(Pose);

impl PoseSource for StaticPose {
    fn lookup(&mut self, _stamp: Time) -> Result<Pose, PoseUnavailable> {
        Ok(self.0)
    }
}

/// Unavailable for the first `failures` lookups, available afterwards.
struct LatePose {
    failures: u32,
    calls: u32,
}

impl PoseSource for LatePose {
    fn lookup(&mut self, _stamp: Time) -> Result<Pose, PoseUnavailable> {
        self.calls += 1;
        if self.calls <= self.failures {
            Err(PoseUnavailable)
        } else {
            Ok(Pose::default())
        }
    }
}

fn pose_at(x: f64, y: f64, z: f64) -> Pose {
    Pose {
        position: Point { x, y, z },
        orientation: Default::default(),
    }
}

fn stamp(sec: i32) -> Time {
    Time { sec, nanosec: 500 }
}

#[test]
fn successful_tick_publishes_one_of_each_with_one_stamp() {
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        NodeConfig::default(),
        ScriptedGenerator::default(),
        StaticPose(pose_at(10.0, -20.0, 50.0)),
        &mut sink,
    )
    .unwrap();

    let outcome = node.tick(stamp(7)).unwrap();
    assert_eq!(outcome, TickOutcome::Published);
    drop(node);

    assert_eq!(sink.rgb.len(), 1);
    assert_eq!(sink.depth.len(), 1);
    assert_eq!(sink.tf.len(), 1);
    assert_eq!(sink.rgb[0].header.stamp, stamp(7));
    assert_eq!(sink.depth[0].header.stamp, stamp(7));
    assert_eq!(sink.tf[0].transforms[0].header.stamp, stamp(7));
}

#[test]
fn transform_mirrors_the_pose_and_frames() {
    let config = NodeConfig::default();
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        config.clone(),
        ScriptedGenerator::default(),
        StaticPose(pose_at(3.0, 4.0, 55.0)),
        &mut sink,
    )
    .unwrap();
    node.tick(stamp(1)).unwrap();
    drop(node);

    let sample = &sink.tf[0].transforms[0];
    assert_eq!(sample.header.frame_id, config.map_frame);
    assert_eq!(sample.child_frame_id, config.sensor_frame);
    assert_eq!(sample.transform.translation.x, 3.0);
    assert_eq!(sample.transform.translation.y, 4.0);
    assert_eq!(sample.transform.translation.z, 55.0);
}

#[test]
fn depth_image_is_invariant_under_pose() {
    let config = NodeConfig {
        image_width: 8,
        image_height: 8,
        constant_depth_value: 7.5,
        ..Default::default()
    };
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        config,
        ScriptedGenerator::default(),
        StaticPose(pose_at(123.0, -456.0, 50.0)),
        &mut sink,
    )
    .unwrap();
    node.tick(stamp(1)).unwrap();
    drop(node);

    let depth = &sink.depth[0];
    assert_eq!(depth.encoding, "32FC1");
    assert_eq!(depth.step, 8 * 4);
    assert_eq!(depth.data.len(), 8 * 8 * 4);
    for px in depth.data.chunks_exact(4) {
        assert_eq!(f32::from_le_bytes([px[0], px[1], px[2], px[3]]), 7.5);
    }
}

#[test]
fn unavailable_pose_skips_the_whole_tick_but_not_the_node() {
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        NodeConfig::default(),
        ScriptedGenerator::default(),
        LatePose {
            failures: 1,
            calls: 0,
        },
        &mut sink,
    )
    .unwrap();

    assert_eq!(node.tick(stamp(1)).unwrap(), TickOutcome::NoPose);
    assert_eq!(node.tick(stamp(2)).unwrap(), TickOutcome::Published);
    drop(node);

    // Nothing from the failed tick, everything from the next one
    assert_eq!(sink.rgb.len(), 1);
    assert_eq!(sink.depth.len(), 1);
    assert_eq!(sink.tf.len(), 1);
    assert_eq!(sink.rgb[0].header.stamp, stamp(2));
}

#[test]
fn out_of_bounds_skips_only_the_rgb_output() {
    let mut generator = ScriptedGenerator {
        out_of_bounds: true,
        ..Default::default()
    };
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        NodeConfig::default(),
        &mut generator,
        StaticPose(pose_at(0.0, 0.0, 50.0)),
        &mut sink,
    )
    .unwrap();

    assert_eq!(node.tick(stamp(1)).unwrap(), TickOutcome::NoRgb);
    drop(node);

    assert!(sink.rgb.is_empty());
    assert_eq!(sink.depth.len(), 1);
    assert_eq!(sink.tf.len(), 1);
}

#[test]
fn unchanged_pose_requests_the_same_coordinate() {
    let mut generator = ScriptedGenerator::default();
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        NodeConfig {
            geo_origin_lat: 45.5,
            geo_origin_lon: -73.6,
            ..Default::default()
        },
        &mut generator,
        StaticPose(pose_at(40.0, 60.0, 50.0)),
        &mut sink,
    )
    .unwrap();

    node.tick(stamp(1)).unwrap();
    node.tick(stamp(2)).unwrap();
    drop(node);

    assert_eq!(generator.requests.len(), 2);
    assert_eq!(generator.requests[0], generator.requests[1]);
}

#[test]
fn pose_at_the_origin_requests_the_geo_origin() {
    let config = NodeConfig {
        image_width: 64,
        image_height: 64,
        constant_depth_value: 5.0,
        publish_rate_hz: 10.0,
        geo_origin_lat: 45.5017,
        geo_origin_lon: -73.5673,
        ..Default::default()
    };
    let mut generator = ScriptedGenerator::default();
    let mut sink = MemorySink::default();
    let mut node = AerialViewPublisher::new(
        config.clone(),
        &mut generator,
        StaticPose(pose_at(0.0, 0.0, 50.0)),
        &mut sink,
    )
    .unwrap();
    node.tick(stamp(3)).unwrap();
    drop(node);

    // Zero planar offset maps exactly onto the configured origin
    assert_eq!(
        generator.requests[0],
        (config.geo_origin_lat, config.geo_origin_lon, 64, 64)
    );

    let rgb = &sink.rgb[0];
    assert_eq!(rgb.encoding, "rgb8");
    assert_eq!((rgb.width, rgb.height), (64, 64));
    assert_eq!(rgb.data.len(), 64 * 64 * 3);

    let depth = &sink.depth[0];
    assert_eq!(depth.data.len(), 64 * 64 * 4);
    for px in depth.data.chunks_exact(4) {
        assert_eq!(f32::from_le_bytes([px[0], px[1], px[2], px[3]]), 5.0);
    }
    assert_eq!(rgb.header.stamp, depth.header.stamp);
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    let config = NodeConfig {
        image_width: 0,
        ..Default::default()
    };
    let result = AerialViewPublisher::new(
        config,
        ScriptedGenerator::default(),
        StaticPose(Pose::default()),
        MemorySink::default(),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}
