//! Qibla bearing: initial great-circle bearing from a point to the Kaaba.

/// Reference coordinate of the Kaaba, Makkah.
pub const KAABA_LAT: f64 = 21.422487;
pub const KAABA_LON: f64 = 39.826206;

/// Initial great-circle bearing in degrees from (lat, lon) toward the Kaaba,
/// normalized into [0, 360). At the Kaaba's own coordinates the bearing is
/// degenerate; the atan2 result is still normalized and returned.
pub fn bearing_to_kaaba(lat: f64, lon: f64) -> f64 {
    bearing(lat, lon, KAABA_LAT, KAABA_LON)
}

/// Standard spherical initial bearing between two coordinates, in degrees
/// normalized into [0, 360).
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let y = delta_lon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Screen rotation for the compass needle given a device heading.
///
/// `alpha` is the rotation around the vertical axis as reported by the
/// device; `360 − alpha` converts it to a compass heading. That convention is
/// platform-specific and should be verified per target device.
pub fn compass_rotation(bearing: f64, alpha: f64) -> f64 {
    let heading = normalize_degrees(360.0 - alpha);
    normalize_degrees(bearing - heading)
}

fn normalize_degrees(deg: f64) -> f64 {
    let d = deg % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_invariant_under_longitude_wrap() {
        let a = bearing_to_kaaba(-6.2, 106.8);
        let b = bearing_to_kaaba(-6.2, 106.8 + 360.0);
        let c = bearing_to_kaaba(-6.2, 106.8 - 360.0);
        assert!((a - b).abs() < 1e-9);
        assert!((a - c).abs() < 1e-9);
    }

    #[test]
    fn due_south_of_kaaba_points_north() {
        let b = bearing(0.0, KAABA_LON, KAABA_LAT, KAABA_LON);
        assert!(b.abs() < 1e-9 || (b - 360.0).abs() < 1e-9);
    }

    #[test]
    fn sample_points_are_distinct_and_normalized() {
        let near = bearing_to_kaaba(21.0, 39.0);
        let far = bearing_to_kaaba(-6.2, 106.8);
        assert!((0.0..360.0).contains(&near));
        assert!((0.0..360.0).contains(&far));
        assert!((near - far).abs() > 1.0);
    }

    #[test]
    fn jakarta_points_roughly_west_north_west() {
        // Well-known value: qibla from Jakarta is around 295°.
        let b = bearing_to_kaaba(-6.2, 106.8);
        assert!(b > 285.0 && b < 300.0, "got {}", b);
    }

    #[test]
    fn rotation_combines_bearing_and_heading() {
        // Device already facing the qibla: needle points straight up.
        let b = 295.0;
        let alpha = 360.0 - 295.0;
        assert!((compass_rotation(b, alpha) - 0.0).abs() < 1e-9);
        // Result always normalized.
        let r = compass_rotation(10.0, 350.0);
        assert!((0.0..360.0).contains(&r));
    }
}
