use chrono::NaiveTime;

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Format a bearing as whole degrees, e.g. "295°"
pub fn format_bearing(deg: f64) -> String {
    format!("{:.0}°", deg)
}

/// Compass point label for a bearing in [0, 360).
pub fn compass_point(deg: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = (((deg + 22.5) / 45.0).floor() as usize) % 8;
    POINTS[idx]
}
