use regex::{Regex, RegexSet};

use super::LineFilter;
use super::error::FilterError;

/// Accepts lines matching at least one of the given patterns.
#[derive(Debug)]
pub struct WordFilter {
    patterns: RegexSet,
}

impl WordFilter {
    /// Builds the filter from raw `--word` values.
    ///
    /// Every value may carry several whitespace-separated regex patterns;
    /// all of them accumulate into one alternation. Returns `Ok(None)` when
    /// no patterns were given, as an always-on filter with nothing to match
    /// would reject every line.
    pub fn from_patterns(values: &[String]) -> Result<Option<Self>, FilterError> {
        let patterns: Vec<&str> = values
            .iter()
            .flat_map(|value| value.split_whitespace())
            .collect();
        if patterns.is_empty() {
            return Ok(None);
        }
        // Compile one by one first so the error names the offending pattern.
        for pattern in &patterns {
            if let Err(source) = Regex::new(pattern) {
                return Err(FilterError::BadPattern {
                    pattern: (*pattern).to_string(),
                    source,
                });
            }
        }
        let patterns = RegexSet::new(&patterns).map_err(|source| FilterError::BadPattern {
            pattern: patterns.join(" "),
            source,
        })?;
        Ok(Some(Self { patterns }))
    }
}

impl LineFilter for WordFilter {
    fn accept(&mut self, line: &str) -> bool {
        self.patterns.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(values: &[&str]) -> WordFilter {
        WordFilter::from_patterns(&values.iter().map(|v| v.to_string()).collect::<Vec<_>>())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn any_pattern_suffices() {
        let mut filter = words(&["getmore", "update"]);
        assert!(filter.accept("Wed Sep 05 23:02:26 [conn1] getmore test.coll"));
        assert!(filter.accept("Wed Sep 05 23:02:26 [conn1] update test.coll"));
        assert!(!filter.accept("Wed Sep 05 23:02:26 [conn1] query test.coll"));
    }

    #[test]
    fn values_split_into_individual_patterns() {
        let mut filter = words(&["getmore update"]);
        assert!(filter.accept("an update happened"));
        assert!(filter.accept("a getmore happened"));
        assert!(!filter.accept("a query happened"));
    }

    #[test]
    fn patterns_are_regexes() {
        let mut filter = words(&[r"conn\d+"]);
        assert!(filter.accept("Wed Sep 05 23:02:26 [conn42] query"));
        assert!(!filter.accept("Wed Sep 05 23:02:26 [initandlisten] waiting"));
    }

    #[test]
    fn no_patterns_build_no_filter() {
        assert!(WordFilter::from_patterns(&[]).unwrap().is_none());
        assert!(
            WordFilter::from_patterns(&["   ".to_string()])
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn a_bad_pattern_names_itself_in_the_error() {
        let err = WordFilter::from_patterns(&["getmore".to_string(), "[".to_string()]).unwrap_err();
        let FilterError::BadPattern { pattern, .. } = err;
        assert_eq!(pattern, "[");
    }
}
