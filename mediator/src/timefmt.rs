/// Formats a position in seconds as `H:MM:SS.mmm`, rounded to the nearest
/// millisecond. Negative and non-finite values show as zero.
pub fn format_time(seconds: f64) -> String {
    let millis = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = millis / 3_600_000;
    let minutes = millis / 60_000 % 60;
    let secs = millis / 1000 % 60;
    let frac = millis % 1000;
    format!("{hours}:{minutes:02}:{secs:02}.{frac:03}")
}
