//! Conversion between colon-delimited clock strings and seconds.
//!
//! Decoding never fails: malformed input decodes to zero. Formatting never
//! carries a rounded-up `60` seconds into the minutes column.

/// Seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds in a minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Decode `H:MM:SS` or `M:SS` into a total number of seconds.
///
/// Any other number of parts, or a part that is not a number, yields `0.0`.
/// Part ranges are not checked, so `"0:75"` is 75 seconds.
pub fn time_to_seconds(text: &str) -> f64 {
    let parts: Option<Vec<f64>> = text.split(':').map(parse_part).collect();
    let Some(parts) = parts else {
        return 0.0;
    };

    match parts.as_slice() {
        [h, m, s] => h * SECONDS_PER_HOUR + m * SECONDS_PER_MINUTE + s,
        [m, s] => m * SECONDS_PER_MINUTE + s,
        _ => 0.0,
    }
}

// Blank parts count as zero, so "1::" is one hour.
fn parse_part(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0.0);
    }
    part.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format seconds as `H:MM:SS`, or `M:SS` when there are no hours and
/// `show_hours` is off.
///
/// Seconds are rounded to the nearest whole second; hours are never padded.
pub fn seconds_to_time(total_seconds: f64, show_hours: bool) -> String {
    let h = (total_seconds / SECONDS_PER_HOUR).floor() as i64;
    let m = ((total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE).floor() as i64;
    let s = (total_seconds % SECONDS_PER_MINUTE).round() as i64;

    if show_hours || h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
