use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

pub const FRESHNESS_HEADER: &str = "# TLE Data Last Updated:";

/// Timestamp embedded in the first line of a TLE file, if any.
pub fn header_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let first = text.lines().next()?.trim_start_matches('\u{feff}');
    let stamp = first.trim_end().strip_prefix(FRESHNESS_HEADER)?.trim();
    match DateTime::parse_from_rfc3339(stamp) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable TLE timestamp {:?}: {}", stamp, e);
            None
        }
    }
}

pub fn file_modified(path: &Path) -> Option<DateTime<Utc>> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified))
}

/// `HH:MM:SS since last TLE update`, hours unbounded.
pub fn format_age(freshness: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - freshness).num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02} since last TLE update",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn reads_header_timestamp() {
        let text = "# TLE Data Last Updated: 2025-11-10T21:13:21.2497508Z\nISS\n";
        let stamp = header_timestamp(text).unwrap();
        assert_eq!(
            stamp.timestamp(),
            Utc.with_ymd_and_hms(2025, 11, 10, 21, 13, 21).unwrap().timestamp()
        );
    }

    #[test]
    fn header_after_byte_order_mark() {
        let text = "\u{feff}# TLE Data Last Updated: 2025-11-10T21:13:21Z\r\nISS\r\n";
        assert_eq!(
            header_timestamp(text),
            Some(Utc.with_ymd_and_hms(2025, 11, 10, 21, 13, 21).unwrap())
        );
    }

    #[test]
    fn header_must_be_first_line() {
        assert!(header_timestamp("ISS\n# TLE Data Last Updated: 2025-11-10T21:13:21Z").is_none());
        assert!(header_timestamp("").is_none());
        assert!(header_timestamp("# TLE Data Last Updated: yesterday").is_none());
    }

    #[test]
    fn formats_age() {
        let then = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let now = then + Duration::hours(27) + Duration::minutes(4) + Duration::seconds(9);
        assert_eq!(format_age(then, now), "27:04:09 since last TLE update");
        assert_eq!(format_age(now, then), "00:00:00 since last TLE update");
    }
}
