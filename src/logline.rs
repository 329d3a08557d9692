//! Fixed-layout view over ctime-stamped log lines
//!
//! Lines are expected to start with `<tag> <Mon> <DD> <HH:MM:SS>`, e.g.
//! `Wed Sep 05 23:02:26 [conn1] query ...`. The format carries no year.
//! Extraction never fails hard: a line that does not fit simply yields no
//! timestamp, and callers decide what that means for them.

use chrono::{NaiveDate, NaiveDateTime};

/// Prefix of restart marker lines, which bypass all filtering.
pub const RESTART_MARKER: &str = "***";

/// Returns true for restart marker lines.
pub fn is_restart_marker(line: &str) -> bool {
    line.starts_with(RESTART_MARKER)
}

/// Maps a ctime month abbreviation to its month number.
pub fn month_from_abbr(abbr: &str) -> Option<u32> {
    match abbr {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

/// Extracts the timestamp of a ctime-stamped log line.
///
/// Looks at the first four whitespace-separated tokens only; the leading
/// weekday tag is not validated. `assumed_year` fills in the year the
/// format lacks. Returns `None` for any line that does not fit, including
/// calendar-invalid dates such as a February 31.
pub fn ctime_timestamp(line: &str, assumed_year: i32) -> Option<NaiveDateTime> {
    let mut tokens = line.split_whitespace();
    let _weekday = tokens.next()?;
    let month = month_from_abbr(tokens.next()?)?;
    let day: u32 = tokens.next()?.parse().ok()?;
    let (hour, minute, second) = clock_prefix(tokens.next()?)?;
    NaiveDate::from_ymd_opt(assumed_year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Extracts the version from a `db version vX.Y.Z` banner line.
pub fn server_version(line: &str) -> Option<&str> {
    const BANNER: &str = "db version v";
    let rest = &line[line.find(BANNER)? + BANNER.len()..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    if end == 0 { None } else { Some(&rest[..end]) }
}

// Accepts `HH:MM:SS` with anything after the seconds, e.g. `23:02:26.123`.
fn clock_prefix(token: &str) -> Option<(u32, u32, u32)> {
    let bytes = token.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour = two_digits(&bytes[0..2])?;
    let minute = two_digits(&bytes[3..5])?;
    let second = two_digits(&bytes[6..8])?;
    Some((hour, minute, second))
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() == 2 && bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit() {
        Some(u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0'))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn extracts_the_leading_ctime_timestamp() {
        let line = "Wed Sep 05 23:02:26 [conn1] query test.coll ntoreturn:0 reslen:53 1500ms";
        assert_eq!(
            ctime_timestamp(line, 2026),
            Some(at(2026, 9, 5, 23, 2, 26))
        );
    }

    #[test]
    fn tolerates_trailing_subsecond_precision() {
        let line = "Wed Sep 05 23:02:26.123 [conn1] getmore";
        assert_eq!(
            ctime_timestamp(line, 2026),
            Some(at(2026, 9, 5, 23, 2, 26))
        );
    }

    #[test]
    fn single_digit_days_parse() {
        let line = "Wed Sep 5 23:02:26 [conn1] insert";
        assert_eq!(
            ctime_timestamp(line, 2026),
            Some(at(2026, 9, 5, 23, 2, 26))
        );
    }

    #[test]
    fn unjudgeable_lines_yield_no_timestamp() {
        assert_eq!(ctime_timestamp("too few tokens", 2026), None);
        assert_eq!(ctime_timestamp("Wed Xyz 05 23:02:26 bad month", 2026), None);
        assert_eq!(ctime_timestamp("Wed Sep 5, 23:02:26 bad day", 2026), None);
        assert_eq!(ctime_timestamp("Wed Feb 31 23:02:26 bad date", 2026), None);
        assert_eq!(ctime_timestamp("Wed Sep 05 25:02:26 bad hour", 2026), None);
        assert_eq!(ctime_timestamp("Wed Sep 05 23:02 short clock", 2026), None);
        assert_eq!(ctime_timestamp("", 2026), None);
    }

    #[test]
    fn restart_markers_are_recognized_by_prefix() {
        assert!(is_restart_marker("***** SERVER RESTARTED *****"));
        assert!(is_restart_marker("***"));
        assert!(!is_restart_marker("** almost"));
        assert!(!is_restart_marker("Wed Sep 05 23:02:26 ***"));
    }

    #[test]
    fn version_banners_yield_the_version_token() {
        let line = "Wed Sep 05 23:02:26 [initandlisten] db version v2.4.9, pdfile version 4.5";
        assert_eq!(server_version(line), Some("2.4.9"));
        assert_eq!(server_version("Wed Sep 05 23:02:26 [conn1] query"), None);
        assert_eq!(server_version("db version v"), None);
    }
}
