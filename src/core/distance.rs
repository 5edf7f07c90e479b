use crate::models::BoundingBox;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check that a coordinate pair is finite and within WGS84 ranges
#[inline]
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
///
/// # Returns
/// BoundingBox with min/max lat/lon
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from Paris to Lyon (approximately 392 km)
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;
        let lyon_lat = 45.7640;
        let lyon_lon = 4.8357;

        let distance = haversine_distance(paris_lat, paris_lon, lyon_lat, lyon_lon);
        assert!(
            (distance - 392.0).abs() < 10.0,
            "Distance should be ~392km, got {}",
            distance
        );
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(is_valid_coordinate(48.8566, 2.3522));
        assert!(is_valid_coordinate(-90.0, 180.0));
        assert!(!is_valid_coordinate(f64::NAN, 2.3522));
        assert!(!is_valid_coordinate(48.8566, f64::INFINITY));
        assert!(!is_valid_coordinate(91.0, 2.3522));
        assert!(!is_valid_coordinate(48.8566, -181.0));
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(48.8566, 2.3522, 10.0);

        assert!(bbox.min_lat < 48.8566);
        assert!(bbox.max_lat > 48.8566);
        assert!(bbox.min_lon < 2.3522);
        assert!(bbox.max_lon > 2.3522);

        // Check approximate size (20km / 111km per degree = ~0.18 degrees)
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(48.8566, 2.3522, 10.0);

        // Center point should be within
        assert!(is_within_bounding_box(48.8566, 2.3522, &bbox));

        // Close point should be within
        assert!(is_within_bounding_box(48.86, 2.35, &bbox));

        // Far point should not be within
        assert!(!is_within_bounding_box(43.3, 5.4, &bbox));
    }
}
