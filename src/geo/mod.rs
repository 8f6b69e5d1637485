//! Geodesy - great-circle distance and the per-device fix store
//!
//! Each scored submission also reports how far the device moved since its
//! previous fix. The distance math is pure; the mutable "last known fix per
//! device" lives in [`DeviceFixStore`].

mod fix_store;

pub use fix_store::{DeviceFix, DeviceFixStore};

use crate::config::defaults::EARTH_RADIUS_M;

/// Haversine great-circle distance between two WGS-84 fixes, in meters.
///
/// `d = 2R · asin(√(sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)))`
///
/// Spherical-earth approximation (R = 6371 km); error against the ellipsoid
/// is well under the GPS fix error at survey distances.
pub fn haversine_m(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let d_lat = (lat2_deg - lat1_deg).to_radians();
    let d_lon = (lon2_deg - lon1_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_coordinates_are_zero() {
        assert_eq!(haversine_m(52.0, 5.0, 52.0, 5.0), 0.0);
    }

    #[test]
    fn test_reference_distance_utrecht_longitude_step() {
        // 0.1° of longitude at 52° N is ~6.85 km.
        let d = haversine_m(52.0, 5.0, 52.0, 5.1);
        let reference = 6860.0;
        assert!(
            (d - reference).abs() / reference < 0.01,
            "distance was {d} m"
        );
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine_m(52.0, 5.0, 48.85, 2.35);
        let ba = haversine_m(48.85, 2.35, 52.0, 5.0);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_equator_degree_is_about_111km() {
        let d = haversine_m(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 100.0, "distance was {d} m");
    }
}
