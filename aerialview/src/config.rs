//! Node configuration, read once at startup and immutable afterwards.

use crate::Error;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    /// Output topic for the RGB aerial image.
    pub rgb_topic: String,
    /// Output topic for the constant-value depth image.
    pub depth_topic: String,
    /// Reference frame of the published transform.
    pub map_frame: String,
    /// Child frame of the published transform, also stamped on the images.
    pub sensor_frame: String,
    /// Pixel dimensions of both published images.
    pub image_width: u32,
    pub image_height: u32,
    /// Tick frequency.
    pub publish_rate_hz: f64,
    /// Geographic anchor of the planar origin, degrees.
    pub geo_origin_lat: f64,
    pub geo_origin_lon: f64,
    /// Ground resolution of the basemap.
    pub meters_per_pixel: f64,
    /// Uniform fill of the depth image.
    pub constant_depth_value: f32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            rgb_topic: "/aerialview/rgb".to_owned(),
            depth_topic: "/aerialview/depth".to_owned(),
            map_frame: "map".to_owned(),
            sensor_frame: "flying_sensor".to_owned(),
            image_width: 512,
            image_height: 512,
            publish_rate_hz: 10.0,
            geo_origin_lat: 0.0,
            geo_origin_lon: 0.0,
            meters_per_pixel: 0.25,
            constant_depth_value: 50.0,
        }
    }
}

impl NodeConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.rgb_topic.is_empty() || self.depth_topic.is_empty() {
            return Err(Error::Config("Topic names must not be empty".to_owned()));
        }
        if self.map_frame.is_empty() || self.sensor_frame.is_empty() {
            return Err(Error::Config("Frame names must not be empty".to_owned()));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(Error::Config(format!(
                "Image size must be positive, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if !self.publish_rate_hz.is_finite() || self.publish_rate_hz <= 0.0 {
            return Err(Error::Config(format!(
                "Publish rate must be positive, got {} Hz",
                self.publish_rate_hz
            )));
        }
        if !(-90.0..=90.0).contains(&self.geo_origin_lat)
            || !(-180.0..=180.0).contains(&self.geo_origin_lon)
        {
            return Err(Error::Config(format!(
                "Geographic origin out of range: ({}, {})",
                self.geo_origin_lat, self.geo_origin_lon
            )));
        }
        if !self.meters_per_pixel.is_finite() || self.meters_per_pixel <= 0.0 {
            return Err(Error::Config(format!(
                "Meters per pixel must be positive, got {}",
                self.meters_per_pixel
            )));
        }
        if !self.constant_depth_value.is_finite() {
            return Err(Error::Config(format!(
                "Depth value must be finite, got {}",
                self.constant_depth_value
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.publish_rate_hz)
    }
}
