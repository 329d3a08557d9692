use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::logline;

use super::error::TimespecError;
use super::tokenizer::{Components, tokenize};

/// Earliest year an expression can resolve to. `start` names it, and an
/// expression without any date component defaults to it.
pub const YEAR_MIN: i32 = 1;
/// Latest year an expression can resolve to. `end` names it.
pub const YEAR_MAX: i32 = 9999;

/// Resolves a time expression to a concrete date-time.
///
/// `now` supplies the current instant for the relative components (`now`,
/// `today`, weekdays, a bare time of day); callers own the clock. `anchor`
/// is the instant a pure offset expression shifts: given `anchor` and an
/// expression that carries an offset but no date and no time, the offset
/// applies to the anchor rather than to the minimum instant. This is how an
/// end boundary like `+1h` means "one hour past the start boundary".
///
/// Month and year offsets move by calendar months and clamp the day to the
/// end of the target month, so `Jan 31 +1mo` resolves to the last day of
/// February.
pub fn resolve(
    expression: &str,
    now: NaiveDateTime,
    anchor: Option<NaiveDateTime>,
) -> Result<NaiveDateTime, TimespecError> {
    let components = tokenize(expression)?;
    from_components(expression, &components, now, anchor)
}

fn from_components(
    expression: &str,
    components: &Components,
    now: NaiveDateTime,
    anchor: Option<NaiveDateTime>,
) -> Result<NaiveDateTime, TimespecError> {
    let mut year = now.year();
    let month;
    let day;
    // Set when the date rule also fixes the time of day, as `now`, `start`
    // and `end` do. Any explicit time component is then ignored.
    let mut clock = None;
    let mut no_date = false;

    if let Some(date) = &components.date {
        let (m, d) = parse_month_day(expression, date)?;
        month = m;
        day = d;
    } else if let Some(weekday) = &components.weekday {
        let date = most_recent_weekday(expression, now.date(), weekday)?;
        year = date.year();
        month = date.month();
        day = date.day();
    } else if let Some(word) = &components.word {
        match word.as_str() {
            "now" => {
                month = now.month();
                day = now.day();
                clock = Some((now.hour(), now.minute(), now.second()));
            }
            "today" => {
                month = now.month();
                day = now.day();
            }
            "start" => {
                year = YEAR_MIN;
                month = 1;
                day = 1;
                clock = Some((0, 0, 0));
            }
            "end" => {
                year = YEAR_MAX;
                month = 12;
                day = 31;
                clock = Some((0, 0, 0));
            }
            other => {
                return Err(invalid(expression, format!("unsupported word '{other}'")));
            }
        }
    } else if components.time_short.is_some() || components.time_long.is_some() {
        month = now.month();
        day = now.day();
    } else {
        year = YEAR_MIN;
        month = 1;
        day = 1;
        no_date = true;
    }

    let mut no_time = false;
    let (hour, minute, second) = if let Some(clock) = clock {
        clock
    } else if let Some(time) = &components.time_short {
        let (h, m) = parse_hm(expression, time)?;
        (h, m, 0)
    } else if let Some(time) = &components.time_long {
        parse_hms(expression, time)?
    } else {
        no_time = true;
        (0, 0, 0)
    };

    let mut resolved = compose(expression, year, month, day, hour, minute, second)?;

    if let Some(offset) = &components.offset {
        if no_date
            && no_time
            && let Some(anchor) = anchor
        {
            resolved = anchor;
        }
        let (amount, unit) = parse_offset(expression, offset)?;
        resolved = apply_offset(expression, resolved, amount, unit)?;
    }

    Ok(resolved)
}

fn invalid(expression: &str, reason: String) -> TimespecError {
    TimespecError::InvalidCalendar {
        expression: expression.to_string(),
        reason,
    }
}

fn parse_month_day(expression: &str, text: &str) -> Result<(u32, u32), TimespecError> {
    let mut parts = text.split_whitespace();
    let month = parts
        .next()
        .and_then(logline::month_from_abbr)
        .ok_or_else(|| invalid(expression, format!("unrecognized month in '{text}'")))?;
    let day = parts
        .next()
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| invalid(expression, format!("unrecognized day in '{text}'")))?;
    Ok((month, day))
}

fn most_recent_weekday(
    expression: &str,
    today: NaiveDate,
    weekday: &str,
) -> Result<NaiveDate, TimespecError> {
    let target = match weekday {
        "Mon" => Weekday::Mon,
        "Tue" => Weekday::Tue,
        "Wed" => Weekday::Wed,
        "Thu" => Weekday::Thu,
        "Fri" => Weekday::Fri,
        "Sat" => Weekday::Sat,
        "Sun" => Weekday::Sun,
        other => return Err(invalid(expression, format!("unrecognized weekday '{other}'"))),
    };
    // Days to walk back from today, 0 when today already is the target.
    let back = (today.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7;
    today
        .checked_sub_signed(Duration::days(i64::from(back)))
        .ok_or_else(|| invalid(expression, format!("no {weekday} within the calendar range")))
}

fn parse_clock(text: &str) -> Option<Vec<u32>> {
    text.split(':').map(|part| part.parse().ok()).collect()
}

fn parse_hm(expression: &str, text: &str) -> Result<(u32, u32), TimespecError> {
    match parse_clock(text).as_deref() {
        Some([h, m]) => Ok((*h, *m)),
        _ => Err(invalid(expression, format!("malformed time '{text}'"))),
    }
}

fn parse_hms(expression: &str, text: &str) -> Result<(u32, u32, u32), TimespecError> {
    match parse_clock(text).as_deref() {
        Some([h, m, s]) => Ok((*h, *m, *s)),
        _ => Err(invalid(expression, format!("malformed time '{text}'"))),
    }
}

fn compose(
    expression: &str,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<NaiveDateTime, TimespecError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| {
            invalid(
                expression,
                format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} does not exist"
                ),
            )
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl OffsetUnit {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "s" | "sec" => Some(Self::Seconds),
            "m" | "min" => Some(Self::Minutes),
            "h" | "hours" => Some(Self::Hours),
            "d" | "days" => Some(Self::Days),
            "w" | "weeks" => Some(Self::Weeks),
            "mo" | "months" => Some(Self::Months),
            "y" | "years" => Some(Self::Years),
            _ => None,
        }
    }
}

fn parse_offset(expression: &str, text: &str) -> Result<(i64, OffsetUnit), TimespecError> {
    let (sign, rest) = if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else {
        return Err(invalid(expression, format!("offset '{text}' has no sign")));
    };
    let unit_start = rest
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| invalid(expression, format!("offset '{text}' has no unit")))?;
    let (digits, unit_token) = rest.split_at(unit_start);
    let magnitude: i64 = digits
        .parse()
        .map_err(|_| invalid(expression, format!("offset magnitude '{digits}' is out of range")))?;
    let unit = OffsetUnit::from_token(unit_token)
        .ok_or_else(|| invalid(expression, format!("unrecognized offset unit '{unit_token}'")))?;
    Ok((sign * magnitude, unit))
}

fn apply_offset(
    expression: &str,
    base: NaiveDateTime,
    amount: i64,
    unit: OffsetUnit,
) -> Result<NaiveDateTime, TimespecError> {
    let shifted = match unit {
        OffsetUnit::Seconds => Duration::try_seconds(amount).and_then(|d| base.checked_add_signed(d)),
        OffsetUnit::Minutes => Duration::try_minutes(amount).and_then(|d| base.checked_add_signed(d)),
        OffsetUnit::Hours => Duration::try_hours(amount).and_then(|d| base.checked_add_signed(d)),
        OffsetUnit::Days => Duration::try_days(amount).and_then(|d| base.checked_add_signed(d)),
        OffsetUnit::Weeks => Duration::try_weeks(amount).and_then(|d| base.checked_add_signed(d)),
        OffsetUnit::Months => shift_months(base, amount),
        OffsetUnit::Years => amount
            .checked_mul(12)
            .and_then(|months| shift_months(base, months)),
    };
    match shifted {
        Some(shifted) if (YEAR_MIN..=YEAR_MAX).contains(&shifted.year()) => Ok(shifted),
        _ => Err(invalid(
            expression,
            format!("offset leaves the supported years {YEAR_MIN}..={YEAR_MAX}"),
        )),
    }
}

fn shift_months(base: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(amount.unsigned_abs()).ok()?;
    if amount >= 0 {
        base.checked_add_months(Months::new(magnitude))
    } else {
        base.checked_sub_months(Months::new(magnitude))
    }
}
