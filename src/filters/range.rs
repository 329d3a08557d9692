use chrono::NaiveDateTime;

use crate::logline;

use super::LineFilter;

/// Accepts lines whose timestamp falls within `[from, to]`, inclusive.
///
/// Lines without a readable timestamp are accepted; the filter only rejects
/// what it can positively place outside the range. Once a line beyond `to`
/// has been seen, the filter reports that the rest of the file can be
/// skipped, relying on log files being written in time order. A later line
/// that is back inside the range clears that state again.
pub struct TimeRangeFilter {
    from: NaiveDateTime,
    to: NaiveDateTime,
    assumed_year: i32,
    past_range: bool,
}

impl TimeRangeFilter {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime, assumed_year: i32) -> Self {
        Self {
            from,
            to,
            assumed_year,
            past_range: false,
        }
    }
}

impl LineFilter for TimeRangeFilter {
    fn accept(&mut self, line: &str) -> bool {
        let Some(timestamp) = logline::ctime_timestamp(line, self.assumed_year) else {
            return true;
        };
        if timestamp > self.to {
            self.past_range = true;
            false
        } else if timestamp < self.from {
            false
        } else {
            self.past_range = false;
            true
        }
    }

    fn skip_remaining(&self) -> bool {
        self.past_range
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn september_filter() -> TimeRangeFilter {
        TimeRangeFilter::new(at(2026, 9, 1, 0, 0, 0), at(2026, 9, 2, 0, 0, 0), 2026)
    }

    #[test]
    fn keeps_lines_inside_the_range() {
        let mut filter = september_filter();
        assert!(filter.accept("Tue Sep 01 10:00:00 [conn1] query"));
        assert!(filter.accept("Wed Sep 02 00:00:00 [conn1] boundary is inclusive"));
        assert!(!filter.skip_remaining());
    }

    #[test]
    fn rejects_lines_before_the_range_without_skipping() {
        let mut filter = september_filter();
        assert!(!filter.accept("Mon Aug 31 23:59:59 [conn1] early"));
        assert!(!filter.skip_remaining());
    }

    #[test]
    fn a_line_past_the_range_requests_the_skip() {
        let mut filter = september_filter();
        assert!(!filter.accept("Thu Sep 03 00:00:01 [conn1] late"));
        assert!(filter.skip_remaining());
    }

    #[test]
    fn a_line_back_in_range_clears_the_skip() {
        let mut filter = september_filter();
        assert!(!filter.accept("Thu Sep 03 00:00:01 [conn1] late"));
        assert!(filter.skip_remaining());
        assert!(filter.accept("Tue Sep 01 12:00:00 [conn1] out of order"));
        assert!(!filter.skip_remaining());
    }

    #[test]
    fn unjudgeable_lines_are_kept() {
        let mut filter = september_filter();
        assert!(filter.accept("no timestamp here"));
        assert!(filter.accept("Wed Feb 31 10:00:00 [conn1] impossible date"));
        assert!(filter.accept(""));
        assert!(!filter.skip_remaining());
    }
}
