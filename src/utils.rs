use crate::core::models::MediaDuration;

pub const APP_NAME: &str = "media-remote";

/// Format a media duration as `HH:MM:SS.mmm`
///
/// Hours wrap at 100 and milliseconds are truncated, never rounded.
///
/// # Arguments
/// * `duration` - Whole seconds plus microsecond remainder
///
/// # Returns
/// * `String` - e.g. `"02:50:34.250"`
pub fn format_duration(duration: MediaDuration) -> String {
    let hours = (duration.seconds / 3600) % 100;
    let minutes = (duration.seconds / 60) % 60;
    let seconds = duration.seconds % 60;
    let millis = (duration.micros / 1000) % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Shorten a title to `max` characters, appending an ellipsis when cut.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let kept: String = title.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
