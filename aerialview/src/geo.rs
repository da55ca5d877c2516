//! Planar pose to geographic coordinate mapping.
//!
//! Spherical Earth model. The node tracks the sensor on a local ENU plane
//! anchored at a configured geographic origin; each tick the planar offset
//! is converted to the latitude/longitude the crop is requested at.

/// Equatorial Earth radius in meters (WGS84 semi-major axis).
pub const EARTH_RADIUS_M: f64 = 6378137.0;

/// Great-circle destination point.
///
/// `bearing_deg` is the true heading in degrees, clockwise from north.
pub fn destination_point(
    lat_deg: f64,
    lon_deg: f64,
    distance_m: f64,
    bearing_deg: f64,
) -> (f64, f64) {
    let lat1 = lat_deg.to_radians();
    let lon1 = lon_deg.to_radians();
    let bearing = bearing_deg.to_radians();
    let angular = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    (lat2.to_degrees(), lon2.to_degrees())
}

/// Geographic anchor of the planar origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoReference {
    pub lat: f64,
    pub lon: f64,
}

impl GeoReference {
    /// Convert a planar ENU offset in meters to a geographic coordinate.
    ///
    /// Deterministic: equal offsets always map to the same coordinate. The
    /// sensor yaw plays no part here, the crop stays axis-aligned.
    pub fn offset_to_geo(&self, east_m: f64, north_m: f64) -> (f64, f64) {
        let distance = east_m.hypot(north_m);
        if distance == 0.0 {
            return (self.lat, self.lon);
        }
        // atan2(east, north) measures clockwise from north
        let bearing = east_m.atan2(north_m).to_degrees();
        destination_point(self.lat, self.lon, distance, bearing)
    }

    /// Inverse small-offset mapping, used to project a coordinate back onto
    /// the planar grid (equirectangular approximation around the anchor).
    pub fn geo_to_offset(&self, lat_deg: f64, lon_deg: f64) -> (f64, f64) {
        let north = (lat_deg - self.lat).to_radians() * EARTH_RADIUS_M;
        let east = (lon_deg - self.lon).to_radians() * EARTH_RADIUS_M * self.lat.to_radians().cos();
        (east, north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ORIGIN: GeoReference = GeoReference {
        lat: 45.0,
        lon: -73.6,
    };

    #[test]
    fn zero_offset_is_the_anchor() {
        let (lat, lon) = ORIGIN.offset_to_geo(0.0, 0.0);
        assert_eq!(lat, ORIGIN.lat);
        assert_eq!(lon, ORIGIN.lon);
    }

    #[test]
    fn northward_offset_only_moves_latitude() {
        let (lat, lon) = ORIGIN.offset_to_geo(0.0, 1000.0);
        assert!(lat > ORIGIN.lat);
        assert_abs_diff_eq!(lon, ORIGIN.lon, epsilon = 1e-9);
        // 1 km north is d/R radians of latitude
        let expected = ORIGIN.lat + (1000.0 / EARTH_RADIUS_M).to_degrees();
        assert_abs_diff_eq!(lat, expected, epsilon = 1e-9);
    }

    #[test]
    fn eastward_offset_at_equator() {
        let equator = GeoReference { lat: 0.0, lon: 10.0 };
        let (lat, lon) = equator.offset_to_geo(1000.0, 0.0);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-9);
        let expected = 10.0 + (1000.0 / EARTH_RADIUS_M).to_degrees();
        assert_abs_diff_eq!(lon, expected, epsilon = 1e-9);
    }

    #[test]
    fn mapping_is_deterministic() {
        let a = ORIGIN.offset_to_geo(123.4, -56.7);
        let b = ORIGIN.offset_to_geo(123.4, -56.7);
        assert_eq!(a, b);
    }

    #[test]
    fn offset_round_trip_is_close_for_small_offsets() {
        let (lat, lon) = ORIGIN.offset_to_geo(250.0, -80.0);
        let (east, north) = ORIGIN.geo_to_offset(lat, lon);
        assert_abs_diff_eq!(east, 250.0, epsilon = 0.1);
        assert_abs_diff_eq!(north, -80.0, epsilon = 0.1);
    }
}
