//! Great-circle distance on a spherical Earth.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two points given in decimal
/// degrees.
///
/// The argument to `asin` is clamped at 1.0: rounding can push the haversine
/// term past 1 by an epsilon when the two points coincide or are antipodal.
pub fn distance_km(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> f64 {
    let dlat = (b_lat - a_lat).to_radians();
    let dlng = (b_lng - a_lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a_lat.to_radians().cos() * b_lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.max(0.0).sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        for &(lat, lng) in &[(0.0, 0.0), (44.98, -93.27), (-33.8688, 151.2093), (90.0, 0.0)] {
            let d = distance_km(lat, lng, lat, lng);
            assert!(d.abs() < 1e-9, "d({}, {}) to itself = {}", lat, lng, d);
        }
    }

    #[test]
    fn symmetric() {
        let d1 = distance_km(19.0760, 72.8777, 28.6139, 77.2090);
        let d2 = distance_km(28.6139, 77.2090, 19.0760, 72.8777);
        assert_eq!(d1, d2);
    }

    #[test]
    fn mumbai_to_delhi() {
        let d = distance_km(19.0760, 72.8777, 28.6139, 77.2090);
        assert!(d > 1161.0 && d < 1163.0, "unexpected distance: {}", d);
    }

    #[test]
    fn minneapolis_to_st_paul() {
        // ≈16 km
        let d = distance_km(44.98, -93.27, 44.95, -93.09);
        assert!(d > 15.0 && d < 17.0, "unexpected distance: {}", d);
    }

    #[test]
    fn antipodal_does_not_overshoot() {
        // Half the Earth's circumference, and asin must not see an argument > 1
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0);
    }

    #[test]
    fn never_negative_for_finite_input() {
        // Out-of-range degrees are the boundary's problem, but the formula
        // must still come back finite and nonnegative.
        for &(a_lat, a_lng, b_lat, b_lng) in
            &[(91.0, 0.0, -91.0, 10.0), (120.0, 400.0, -120.0, -400.0), (89.999, 179.999, -89.999, -179.999)]
        {
            let d = distance_km(a_lat, a_lng, b_lat, b_lng);
            assert!(d.is_finite() && d >= 0.0, "d = {}", d);
        }
    }
}
