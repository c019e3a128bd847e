//! Display formatting shared by the console screens.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

pub use redactdesk_table::{matches_text, sort_label};

/// Number of body characters shown on a message card.
pub const PREVIEW_CHARS: usize = 100;

/// Suffix appended to truncated previews.
pub const PREVIEW_SUFFIX: &str = " ...";

/// Shortens `text` to at most `limit` characters, cutting at the last space.
///
/// Text within the limit is returned unchanged. Otherwise the cut falls on the
/// last space among the first `limit + 1` characters (or at `limit` when there
/// is none) and `suffix` is appended.
#[must_use]
pub fn truncate_at_last_space(text: &str, limit: usize, suffix: &str) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let head: String = text.chars().take(limit + 1).collect();
    let cut = match head.rfind(' ') {
        Some(index) => &head[..index],
        None => {
            let end = head.char_indices().nth(limit).map_or(head.len(), |(i, _)| i);
            &head[..end]
        }
    };
    format!("{cut}{suffix}")
}

/// Card preview of a message body.
#[must_use]
pub fn preview(text: &str) -> String {
    truncate_at_last_space(text, PREVIEW_CHARS, PREVIEW_SUFFIX)
}

/// Parses the timestamp shapes the server emits into local wall-clock time.
#[must_use]
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    let timestamp = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Received time for a message card: the time when it arrived today, else the date.
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_received(timestamp: &str, now: NaiveDateTime) -> String {
    match parse_timestamp(timestamp) {
        Some(received) if received.date() == now.date() => {
            received.format("%-I:%M %p").to_string()
        }
        Some(received) => received.format("%m/%d/%Y").to_string(),
        None => timestamp.to_string(),
    }
}

/// Creation time for table cells. Any `+offset` suffix is ignored.
#[must_use]
pub fn format_created(timestamp: &str) -> String {
    let local = timestamp.split('+').next().unwrap_or_default();
    match parse_timestamp(local) {
        Some(created) => created.format("%m/%d/%Y %-I:%M %p").to_string(),
        None => timestamp.to_string(),
    }
}

/// Full date and time for the message detail view.
#[must_use]
pub fn format_detail(timestamp: &str) -> String {
    parse_timestamp(timestamp).map_or_else(
        || timestamp.to_string(),
        |value| value.format("%A, %B %-d, %Y %-I:%M %p").to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_at_last_space("hello world", 100, " ..."), "hello world");
    }

    #[test]
    fn test_truncate_cuts_at_last_space() {
        assert_eq!(
            truncate_at_last_space("the quick brown fox", 12, " ..."),
            "the quick ..."
        );
        // the character right after the limit may be the space
        assert_eq!(truncate_at_last_space("abcd efgh", 4, "..."), "abcd...");
    }

    #[test]
    fn test_truncate_without_spaces_hard_cuts() {
        assert_eq!(truncate_at_last_space("abcdefghij", 4, "..."), "abcd...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_at_last_space("ééé ééé", 5, "~"), "ééé~");
    }

    #[test]
    fn test_received_today_shows_time() {
        let now = at("2024-05-02 18:00:00");
        assert_eq!(format_received("2024-05-02T09:05:00", now), "9:05 AM");
        assert_eq!(format_received("2024-05-01 23:59:00", now), "05/01/2024");
    }

    #[test]
    fn test_received_unparseable_passthrough() {
        let now = at("2024-05-02 18:00:00");
        assert_eq!(format_received("yesterday-ish", now), "yesterday-ish");
    }

    #[test]
    fn test_created_strips_offset() {
        assert_eq!(
            format_created("2024-03-01T14:30:00.123456+00:00"),
            "03/01/2024 2:30 PM"
        );
        assert_eq!(format_created(""), "");
    }
}
