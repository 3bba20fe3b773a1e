//! Wall-clock timestamps at second precision.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::StoreError;

pub const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Current local time as `YYYY-MM-DD HH:MM:SS`. Falls back to UTC when the
/// local offset is indeterminate.
pub fn now_stamp() -> Result<String, StoreError> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&TIMESTAMP_FORMAT)
        .map_err(StoreError::ClockFormat)
}

/// Calendar-day prefix of a stored timestamp, or `None` when the timestamp
/// does not begin with a parseable date.
#[must_use]
pub fn date_prefix(stamp: &str) -> Option<&str> {
    let prefix = stamp.get(..10)?;
    Date::parse(prefix, DATE_FORMAT).ok()?;
    Some(prefix)
}

#[cfg(test)]
mod tests {
    use super::{date_prefix, now_stamp};

    #[test]
    fn now_stamp_has_second_precision_shape() {
        let stamp = now_stamp().expect("timestamp should format");
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }

    #[test]
    fn date_prefix_accepts_stored_timestamps() {
        assert_eq!(
            date_prefix("2026-08-06 09:15:00"),
            Some("2026-08-06")
        );
    }

    #[test]
    fn date_prefix_rejects_garbage() {
        assert_eq!(date_prefix("yesterday, roughly"), None);
        assert_eq!(date_prefix("2026-13-99 00:00:00"), None);
        assert_eq!(date_prefix("short"), None);
    }
}
