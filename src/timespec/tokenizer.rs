use std::sync::LazyLock;

use regex::Regex;

use super::error::TimespecError;

/// The component kinds a time expression is built from, in matching priority
/// order. A weekday is tried before a date, a date before a word, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Weekday,
    Date,
    Word,
    TimeShort,
    TimeLong,
    Offset,
}

const PRIORITY: [ComponentKind; 6] = [
    ComponentKind::Weekday,
    ComponentKind::Date,
    ComponentKind::Word,
    ComponentKind::TimeShort,
    ComponentKind::TimeLong,
    ComponentKind::Offset,
];

// Every grammar is anchored and requires the component to end at the input
// end or at whitespace, so "Mon" matches but "Monday" does not.
static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Mon|Tue|Wed|Thu|Fri|Sat|Sun)($|\s+)").expect("valid weekday grammar")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2})($|\s+)")
        .expect("valid date grammar")
});

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(now|start|end|today)($|\s+)").expect("valid word grammar"));

static TIME_SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}:\d{2})($|\s+)").expect("valid short time grammar"));

static TIME_LONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2}:\d{2})($|\s+)").expect("valid long time grammar")
});

static OFFSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]\d+(?:s|sec|m|min|h|hours|d|days|w|weeks|mo|months|y|years))($|\s+)")
        .expect("valid offset grammar")
});

fn grammar(kind: ComponentKind) -> &'static Regex {
    match kind {
        ComponentKind::Weekday => &WEEKDAY_RE,
        ComponentKind::Date => &DATE_RE,
        ComponentKind::Word => &WORD_RE,
        ComponentKind::TimeShort => &TIME_SHORT_RE,
        ComponentKind::TimeLong => &TIME_LONG_RE,
        ComponentKind::Offset => &OFFSET_RE,
    }
}

/// The components recognized in a time expression, one slot per kind.
///
/// Components may appear in any order in the input, but each kind is
/// recorded at most once; a second occurrence of an already-filled kind is
/// left unconsumed and reported as unparsed input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    pub weekday: Option<String>,
    pub date: Option<String>,
    pub word: Option<String>,
    pub time_short: Option<String>,
    pub time_long: Option<String>,
    pub offset: Option<String>,
}

impl Components {
    fn contains(&self, kind: ComponentKind) -> bool {
        self.slot(kind).is_some()
    }

    fn record(&mut self, kind: ComponentKind, text: &str) {
        *self.slot_mut(kind) = Some(text.to_string());
    }

    fn slot(&self, kind: ComponentKind) -> &Option<String> {
        match kind {
            ComponentKind::Weekday => &self.weekday,
            ComponentKind::Date => &self.date,
            ComponentKind::Word => &self.word,
            ComponentKind::TimeShort => &self.time_short,
            ComponentKind::TimeLong => &self.time_long,
            ComponentKind::Offset => &self.offset,
        }
    }

    fn slot_mut(&mut self, kind: ComponentKind) -> &mut Option<String> {
        match kind {
            ComponentKind::Weekday => &mut self.weekday,
            ComponentKind::Date => &mut self.date,
            ComponentKind::Word => &mut self.word,
            ComponentKind::TimeShort => &mut self.time_short,
            ComponentKind::TimeLong => &mut self.time_long,
            ComponentKind::Offset => &mut self.offset,
        }
    }
}

/// Matches the highest-priority grammar not yet recorded against the start
/// of `remainder`. Returns the matched kind, the component text, and the
/// remainder after the component and its trailing whitespace.
fn next_component<'a>(
    remainder: &'a str,
    seen: &Components,
) -> Option<(ComponentKind, &'a str, &'a str)> {
    for kind in PRIORITY {
        if seen.contains(kind) {
            continue;
        }
        if let Some(caps) = grammar(kind).captures(remainder)
            && let Some(text) = caps.get(1)
            && let Some(full) = caps.get(0)
        {
            return Some((kind, text.as_str(), &remainder[full.end()..]));
        }
    }
    None
}

/// Splits a time expression into its components.
///
/// All grammars are retried against the remaining text on every round, so
/// components may appear in any order ("10:00 Sun" and "Sun 10:00" are
/// equivalent). Text that no unfilled grammar matches is an error rather
/// than being silently dropped.
pub fn tokenize(expression: &str) -> Result<Components, TimespecError> {
    let mut components = Components::default();
    let mut remainder = expression.trim();
    while !remainder.is_empty() {
        match next_component(remainder, &components) {
            Some((kind, text, rest)) => {
                components.record(kind, text);
                remainder = rest;
            }
            None => {
                return Err(TimespecError::UnparsedInput {
                    expression: expression.to_string(),
                    fragment: remainder.to_string(),
                });
            }
        }
    }
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_component_kind() {
        let components = tokenize("Sat Sep 29 10:00:00 +1h").unwrap();
        assert_eq!(components.weekday.as_deref(), Some("Sat"));
        assert_eq!(components.date.as_deref(), Some("Sep 29"));
        assert_eq!(components.time_long.as_deref(), Some("10:00:00"));
        assert_eq!(components.offset.as_deref(), Some("+1h"));
        assert_eq!(components.word, None);
        assert_eq!(components.time_short, None);
    }

    #[test]
    fn components_match_in_any_order() {
        let forward = tokenize("Sun 10:00").unwrap();
        let backward = tokenize("10:00 Sun").unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.weekday.as_deref(), Some("Sun"));
        assert_eq!(forward.time_short.as_deref(), Some("10:00"));
    }

    #[test]
    fn short_and_long_times_fill_separate_slots() {
        let components = tokenize("10:00 11:00:30").unwrap();
        assert_eq!(components.time_short.as_deref(), Some("10:00"));
        assert_eq!(components.time_long.as_deref(), Some("11:00:30"));
    }

    #[test]
    fn long_time_is_not_misread_as_short_time() {
        let components = tokenize("10:00:00").unwrap();
        assert_eq!(components.time_short, None);
        assert_eq!(components.time_long.as_deref(), Some("10:00:00"));
    }

    #[test]
    fn repeated_kind_is_unparsed_input() {
        let err = tokenize("10:00 11:00").unwrap_err();
        assert_eq!(
            err,
            TimespecError::UnparsedInput {
                expression: "10:00 11:00".to_string(),
                fragment: "11:00".to_string(),
            }
        );
    }

    #[test]
    fn leftover_text_reports_the_fragment() {
        let err = tokenize("Sep 29 gibberish").unwrap_err();
        match err {
            TimespecError::UnparsedInput {
                expression,
                fragment,
            } => {
                assert_eq!(expression, "Sep 29 gibberish");
                assert_eq!(fragment, "gibberish");
            }
            other => panic!("expected UnparsedInput, got {other:?}"),
        }
    }

    #[test]
    fn components_must_end_at_a_word_boundary() {
        assert!(tokenize("Monday").is_err());
        assert!(tokenize("Mon").is_ok());
        assert!(tokenize("nowhere").is_err());
    }

    #[test]
    fn offset_units_match_longest_alternative() {
        assert_eq!(
            tokenize("+3months").unwrap().offset.as_deref(),
            Some("+3months")
        );
        assert_eq!(tokenize("+3mo").unwrap().offset.as_deref(), Some("+3mo"));
        assert_eq!(tokenize("+3m").unwrap().offset.as_deref(), Some("+3m"));
        assert_eq!(tokenize("-90sec").unwrap().offset.as_deref(), Some("-90sec"));
    }

    #[test]
    fn date_day_is_at_most_two_digits() {
        assert_eq!(tokenize("Jan 5").unwrap().date.as_deref(), Some("Jan 5"));
        assert_eq!(tokenize("Jan 25").unwrap().date.as_deref(), Some("Jan 25"));
        assert!(tokenize("Jan 123").is_err());
    }

    #[test]
    fn empty_expression_has_no_components() {
        assert_eq!(tokenize("").unwrap(), Components::default());
        assert_eq!(tokenize("   ").unwrap(), Components::default());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let components = tokenize("  Sep 29   10:00  ").unwrap();
        assert_eq!(components.date.as_deref(), Some("Sep 29"));
        assert_eq!(components.time_short.as_deref(), Some("10:00"));
    }
}
