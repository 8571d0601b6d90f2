//! Proximity helpers
//!
//! Candidates are prefiltered in SQL with a bounding box, then measured
//! with the Haversine formula and sorted nearest first.

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two points in meters
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Lat/lon rectangle enclosing a search circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Smallest box holding every point within `radius_km` of the center
    ///
    /// Uses the same sphere as [`haversine_meters`], so the box is always a
    /// superset of the circle that filter keeps.
    pub fn around(lat: f64, lon: f64, radius_km: f64) -> Self {
        let full = |min_lat: f64, max_lat: f64| Self {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        };

        // Angular radius
        let delta = radius_km * 1000.0 / EARTH_RADIUS_M;
        if delta >= std::f64::consts::PI {
            return full(-90.0, 90.0);
        }
        let d_lat = delta.to_degrees();
        let min_lat = (lat - d_lat).max(-90.0);
        let max_lat = (lat + d_lat).min(90.0);

        // A circle over a pole reaches every longitude
        if max_lat >= 90.0 || min_lat <= -90.0 {
            return full(min_lat, max_lat);
        }

        let ratio = delta.sin() / lat.to_radians().cos();
        if !(0.0..1.0).contains(&ratio) {
            return full(min_lat, max_lat);
        }
        let d_lon = ratio.asin().to_degrees();

        Self {
            min_lat,
            max_lat,
            min_lon: wrap_longitude(lon - d_lon),
            max_lon: wrap_longitude(lon + d_lon),
        }
    }

    /// True when the box crosses the ±180° meridian (`min_lon > max_lon`)
    pub fn wraps_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let lat_ok = lat >= self.min_lat && lat <= self.max_lat;
        let lon_ok = if self.wraps_antimeridian() {
            lon >= self.min_lon || lon <= self.max_lon
        } else {
            lon >= self.min_lon && lon <= self.max_lon
        };
        lat_ok && lon_ok
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Keep items within `radius_km` of the origin, nearest first
///
/// `coords` extracts an item's position. Returns `(item, distance_m)` pairs.
pub fn within_radius<T>(
    items: Vec<T>,
    origin: (f64, f64),
    radius_km: f64,
    coords: impl Fn(&T) -> (f64, f64),
) -> Vec<(T, f64)> {
    let radius_m = radius_km * 1000.0;
    let mut hits: Vec<(T, f64)> = items
        .into_iter()
        .filter_map(|item| {
            let (lat, lon) = coords(&item);
            let distance = haversine_meters(origin.0, origin.1, lat, lon);
            (distance <= radius_m).then_some((item, distance))
        })
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Bengaluru MG Road to Indiranagar, roughly 3.9 km
        let d = haversine_meters(12.9756, 77.6050, 12.9784, 77.6408);
        assert!((3_800.0..4_300.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_haversine_zero_and_symmetric() {
        assert_eq!(haversine_meters(10.0, 20.0, 10.0, 20.0), 0.0);
        let ab = haversine_meters(10.0, 20.0, 11.0, 21.0);
        let ba = haversine_meters(11.0, 21.0, 10.0, 20.0);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box_contains_circle() {
        let bbox = BoundingBox::around(12.97, 77.59, 5.0);
        assert!(bbox.contains(12.97, 77.59));
        assert!(bbox.contains(13.01, 77.59));
        assert!(!bbox.contains(13.10, 77.59));
        assert!(!bbox.wraps_antimeridian());
    }

    #[test]
    fn test_bounding_box_wraps_antimeridian() {
        let bbox = BoundingBox::around(0.0, 179.99, 10.0);
        assert!(bbox.wraps_antimeridian());
        assert!(bbox.contains(0.0, -179.99));
        assert!(bbox.contains(0.0, 179.95));
        assert!(!bbox.contains(0.0, 0.0));
    }

    #[test]
    fn test_bounding_box_near_pole_spans_all_longitudes() {
        let bbox = BoundingBox::around(89.99, 0.0, 5.0);
        assert_eq!(bbox.min_lon, -180.0);
        assert_eq!(bbox.max_lon, 180.0);
    }

    #[test]
    fn test_within_radius_sorts_nearest_first() {
        let points = vec![("far", 12.99, 77.59), ("near", 12.971, 77.59), ("out", 14.0, 77.59)];
        let hits = within_radius(points, (12.97, 77.59), 5.0, |p| (p.1, p.2));
        let names: Vec<_> = hits.iter().map(|(p, _)| p.0).collect();
        assert_eq!(names, vec!["near", "far"]);
        assert!(hits[0].1 < hits[1].1);
    }

    /// Point `distance_m` from the origin along `bearing_deg`
    fn destination(lat: f64, lon: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
        let delta = distance_m / EARTH_RADIUS_M;
        let (phi, theta) = (lat.to_radians(), bearing_deg.to_radians());
        let phi2 = (phi.sin() * delta.cos() + phi.cos() * delta.sin() * theta.cos()).asin();
        let lambda2 = lon.to_radians()
            + (theta.sin() * delta.sin() * phi.cos()).atan2(delta.cos() - phi.sin() * phi2.sin());
        (phi2.to_degrees(), wrap_longitude(lambda2.to_degrees()))
    }

    #[test]
    fn test_bounding_box_holds_every_point_inside_the_radius() {
        for (lat, lon, radius_km) in [(60.0, 10.0, 50.0), (12.97, 77.59, 5.0), (-45.0, 179.9, 30.0), (75.0, -20.0, 200.0)] {
            let bbox = BoundingBox::around(lat, lon, radius_km);
            let reach = radius_km * 1000.0 - 10.0;
            for step in 0..3600 {
                let (p_lat, p_lon) = destination(lat, lon, f64::from(step) / 10.0, reach);
                assert!(haversine_meters(lat, lon, p_lat, p_lon) <= radius_km * 1000.0);
                assert!(
                    bbox.contains(p_lat, p_lon),
                    "({lat}, {lon}) r={radius_km}km misses ({p_lat}, {p_lon})"
                );
            }
        }
    }

    #[test]
    fn test_bounding_box_is_tight() {
        let bbox = BoundingBox::around(60.0, 10.0, 50.0);
        // 50 km is about 0.4497 degrees of latitude and 0.8993 of longitude at 60N
        assert!((bbox.max_lat - 60.0 - 0.4497).abs() < 1e-3, "{bbox:?}");
        assert!((bbox.max_lon - 10.0 - 0.8993).abs() < 1e-3, "{bbox:?}");
    }
}
