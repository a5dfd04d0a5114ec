use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

/// Format used by the stories backend, e.g. `2024-01-01 09:30:00`.
const BACKEND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a story timestamp as a calendar date (`2024-01-01`).
///
/// Accepts the backend's naive `YYYY-MM-DD HH:MM:SS` form and RFC 3339
/// instants (normalized to UTC). Anything else is returned unchanged so the
/// user still sees what the server sent.
pub fn format_story_date(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::strptime(BACKEND_FORMAT, raw) {
        return dt.date().to_string();
    }

    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts.to_zoned(TimeZone::UTC).date().to_string();
    }

    raw.to_string()
}
