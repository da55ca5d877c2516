//! The aerial image provider and its bundled basemap-backed implementation.

use crate::geo::GeoReference;
use crate::Error;
use image::RgbImage;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum CropError {
    #[error("Coordinate ({0}, {1}) falls outside the available map data")]
    OutOfBounds(f64, f64),
}

/// Narrow interface to the aerial image source. One axis-aligned RGB crop
/// per request, centered at the given coordinate.
pub trait AerialProvider {
    fn request_crop(
        &mut self,
        lat: f64,
        lon: f64,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, CropError>;
}

impl<T: AerialProvider + ?Sized> AerialProvider for &mut T {
    fn request_crop(
        &mut self,
        lat: f64,
        lon: f64,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, CropError> {
        (**self).request_crop(lat, lon, width, height)
    }
}

/// Provider backed by a single georeferenced basemap image on disk.
///
/// The basemap is anchored with its center pixel at the geographic anchor
/// and covers `meters_per_pixel` ground meters per pixel. Requests are
/// projected into pixel space and cut out of the basemap; nothing is
/// fetched, stitched or cached.
pub struct BasemapGenerator {
    basemap: RgbImage,
    anchor: GeoReference,
    meters_per_pixel: f64,
}

impl BasemapGenerator {
    /// Open the basemap from disk. Fails when the file is missing or not a
    /// decodable image.
    pub fn open(path: &Path, anchor: GeoReference, meters_per_pixel: f64) -> Result<Self, Error> {
        let basemap = image::open(path)?.to_rgb8();
        Ok(Self::from_image(basemap, anchor, meters_per_pixel))
    }

    pub fn from_image(basemap: RgbImage, anchor: GeoReference, meters_per_pixel: f64) -> Self {
        BasemapGenerator {
            basemap,
            anchor,
            meters_per_pixel,
        }
    }
}

impl AerialProvider for BasemapGenerator {
    fn request_crop(
        &mut self,
        lat: f64,
        lon: f64,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, CropError> {
        let (east, north) = self.anchor.geo_to_offset(lat, lon);

        // Basemap pixel coordinates grow east and south
        let cx = self.basemap.width() as f64 / 2.0 + east / self.meters_per_pixel;
        let cy = self.basemap.height() as f64 / 2.0 - north / self.meters_per_pixel;
        // Snap the window to whole pixels
        let left = (cx - width as f64 / 2.0).round();
        let top = (cy - height as f64 / 2.0).round();

        if left < 0.0
            || top < 0.0
            || left + width as f64 > self.basemap.width() as f64
            || top + height as f64 > self.basemap.height() as f64
        {
            return Err(CropError::OutOfBounds(lat, lon));
        }

        let crop =
            image::imageops::crop_imm(&self.basemap, left as u32, top as u32, width, height);
        Ok(crop.to_image())
    }
}
