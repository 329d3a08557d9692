use std::sync::LazyLock;

use regex::Regex;

use super::LineFilter;

static SLOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4,}ms").expect("valid duration regex"));

/// Accepts lines reporting an operation of 1000 ms or more, recognized as a
/// number of four or more digits glued to `ms`.
pub struct SlowFilter;

impl LineFilter for SlowFilter {
    fn accept(&mut self, line: &str) -> bool {
        SLOW_RE.is_match(line)
    }
}
