use crate::{series::SeriesWithStep, CronError, Result};
use std::{borrow::Cow, collections::BTreeSet, fmt::Display};

/// Minimum valid year.
pub const MIN_YEAR: FieldValue = 1970;
/// Maximum valid year.
pub const MAX_YEAR: FieldValue = 2099;

/// Numeric value of any field: second, minute, hour, day, month, day of week (`1..=7`) or year.
pub type FieldValue = u32;

/// Position of the field in the cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Seconds, `0..=59`.
    Seconds,
    /// Minutes, `0..=59`.
    Minutes,
    /// Hours, `0..=23`.
    Hours,
    /// Day of month, `1..=31`.
    DaysOfMonth,
    /// Month, `1..=12` or `JAN..DEC`.
    Months,
    /// Day of week, `1..=7` (Sunday is `1`) or `SUN..SAT`.
    DaysOfWeek,
    /// Year, `1970..=2099`, optional.
    Years,
}

impl FieldKind {
    pub(crate) const DAYS_OF_WEEK: [&'static str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    pub(crate) const MONTHS: [&'static str; 12] = [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ];

    /// Returns inclusive bounds of the field values.
    pub const fn min_max(self) -> (FieldValue, FieldValue) {
        match self {
            Self::Seconds | Self::Minutes => (0, 59),
            Self::Hours => (0, 23),
            Self::DaysOfMonth => (1, 31),
            Self::Months => (1, 12),
            Self::DaysOfWeek => (1, 7),
            Self::Years => (MIN_YEAR, MAX_YEAR),
        }
    }

    /// Returns name of the field as it appears in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::DaysOfMonth => "day-of-month",
            Self::Months => "month",
            Self::DaysOfWeek => "day-of-week",
            Self::Years => "year",
        }
    }

    /// Mnemonic names, the first one stands for `1`.
    fn aliases(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Months => Some(&Self::MONTHS),
            Self::DaysOfWeek => Some(&Self::DAYS_OF_WEEK),
            _ => None,
        }
    }

    fn all(self) -> BTreeSet<FieldValue> {
        let (min, max) = self.min_max();
        (min..=max).collect()
    }

    fn error(self, detail: impl Into<String>) -> CronError {
        CronError::syntax(self, detail)
    }

    /// Replaces each three-letter alias with its numeric value.
    ///
    /// Letters are taken in groups of three from every run of letters, shorter leftovers stay untouched.
    fn substitute_aliases(self, input: &str) -> Result<Cow<'_, str>> {
        let Some(aliases) = self.aliases() else {
            return Ok(Cow::Borrowed(input));
        };
        if !input.chars().any(|c| c.is_ascii_alphabetic()) {
            return Ok(Cow::Borrowed(input));
        }

        let mut output = String::with_capacity(input.len());
        let mut token = String::with_capacity(3);
        for c in input.chars() {
            if c.is_ascii_alphabetic() {
                token.push(c);
                if token.len() == 3 {
                    let value = aliases
                        .iter()
                        .position(|alias| alias.eq_ignore_ascii_case(&token))
                        .ok_or_else(|| self.error(format!("invalid alias: {token}")))?;
                    output.push_str(&(value + 1).to_string());
                    token.clear();
                }
            } else {
                output.push_str(&token);
                token.clear();
                output.push(c);
            }
        }
        output.push_str(&token);

        Ok(Cow::Owned(output))
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parsed representation of a single field of the cron expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParsedField {
    /// Explicit values: `*`, single value, list, range or step, ascending and deduplicated.
    Static(BTreeSet<FieldValue>),
    /// `?`, day of month or day of week only.
    NoSpecificValue,
    /// `L` in day of month.
    LastDay,
    /// `L-3` in day of month: number of days before the last day of the month.
    LastDayOffset(FieldValue),
    /// `15W` in day of month.
    WeekdayNearest(FieldValue),
    /// `LW` in day of month.
    LastWeekdayOfMonth,
    /// `6L` in day of week: the last Friday of the month.
    LastWeekday(FieldValue),
    /// `6#3` in day of week: the third Friday of the month.
    NthWeekday {
        /// Day of week, `1..=7`.
        day: FieldValue,
        /// Occurrence of the day in the month, `1..=6`.
        occurrence: FieldValue,
    },
    /// Omitted year field, any year.
    UnspecifiedYear,
}

impl ParsedField {
    /// Parses single field of the specified kind.
    pub fn parse(kind: FieldKind, input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return if kind == FieldKind::Years {
                Ok(Self::UnspecifiedYear)
            } else {
                Err(kind.error("empty"))
            };
        }

        if input == "*" {
            return Ok(Self::Static(kind.all()));
        }

        let input = kind.substitute_aliases(input)?;
        match kind {
            FieldKind::DaysOfMonth => parse_days_of_month(&input),
            FieldKind::DaysOfWeek => parse_days_of_week(&input),
            FieldKind::Months => {
                if input.contains(['L', 'l', 'W', 'w', '#']) {
                    Err(kind.error(
                        "special characters 'L', 'W', or '#' are not allowed in month field",
                    ))
                } else {
                    parse_values(kind, &input).map(Self::Static)
                }
            }
            _ => parse_values(kind, &input).map(Self::Static),
        }
    }

    /// Returns `true` for the `?` field.
    #[inline]
    pub fn is_no_specific_value(&self) -> bool {
        matches!(self, Self::NoSpecificValue)
    }
}

/// Returns name of the list/range/step combinator present in the input.
fn combinator(input: &str) -> Option<&'static str> {
    if input.contains('-') {
        Some("ranges")
    } else if input.contains(',') {
        Some("lists")
    } else if input.contains('/') {
        Some("steps")
    } else {
        None
    }
}

/// Converts one to four digits into a number, without bounds validation.
fn parse_number(input: &str) -> Option<FieldValue> {
    if input.is_empty() || input.len() > 4 || !input.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        input.parse().ok()
    }
}

fn parse_days_of_month(input: &str) -> Result<ParsedField> {
    let kind = FieldKind::DaysOfMonth;

    if input.contains('#') {
        return Err(kind.error("'#' is not allowed in day-of-month field"));
    }

    let is_last_day = input == "L"
        || input
            .strip_prefix("L-")
            .is_some_and(|offset| !offset.is_empty() && offset.bytes().all(|b| b.is_ascii_digit()));
    if input.contains('L') && !is_last_day {
        if let Some(combinator) = combinator(input) {
            return Err(kind.error(format!("cannot specify {combinator} with 'L'")));
        }
    }

    if input.contains('W') {
        if let Some(combinator) = combinator(input) {
            return Err(kind.error(format!(
                "'W' can only be specified for a single day, not {combinator}"
            )));
        }
    }

    match input {
        "?" => return Ok(ParsedField::NoSpecificValue),
        "L" => return Ok(ParsedField::LastDay),
        "LW" => return Ok(ParsedField::LastWeekdayOfMonth),
        _ => {}
    }

    if let Some(offset) = input.strip_prefix("L-") {
        return match offset.parse::<FieldValue>() {
            Ok(offset) if offset <= 31 => Ok(ParsedField::LastDayOffset(offset)),
            _ => Err(kind.error(format!("invalid offset in last day: {input}"))),
        };
    }

    if let Some(day) = input.strip_suffix('W').filter(|day| (1..=2).contains(&day.len())) {
        if let Some(day) = parse_number(day) {
            return if (1..=31).contains(&day) {
                Ok(ParsedField::WeekdayNearest(day))
            } else {
                Err(kind.error(format!("invalid day in weekday: {input}")))
            };
        }
    }

    parse_values(kind, input).map(ParsedField::Static)
}

fn parse_days_of_week(input: &str) -> Result<ParsedField> {
    let kind = FieldKind::DaysOfWeek;

    if input.contains('W') {
        return Err(kind.error("'W' is not allowed in day-of-week field"));
    }

    for special in ['L', '#'] {
        if input.contains(special) {
            if let Some(combinator) = combinator(input) {
                return Err(kind.error(format!("cannot specify {combinator} with '{special}'")));
            }
        }
    }

    match input {
        "?" => return Ok(ParsedField::NoSpecificValue),
        // Standalone `L` is the last day of the week
        "L" => return Ok(ParsedField::Static(BTreeSet::from([7]))),
        _ => {}
    }

    if let Some(day) = input.strip_suffix('L').filter(|day| (1..=2).contains(&day.len())) {
        if let Some(day) = parse_number(day) {
            return if (1..=7).contains(&day) {
                Ok(ParsedField::LastWeekday(day))
            } else {
                Err(kind.error(format!("invalid day in last weekday: {input}")))
            };
        }
    }

    if let Some((day, occurrence)) = input.split_once('#') {
        return match (parse_number(day), parse_number(occurrence)) {
            (Some(day), Some(occurrence)) if (1..=7).contains(&day) && (1..=6).contains(&occurrence) => {
                Ok(ParsedField::NthWeekday { day, occurrence })
            }
            _ => Err(kind.error(format!("invalid nth weekday: {input}"))),
        };
    }

    parse_values(kind, input).map(ParsedField::Static)
}

/// Parses generic numeric syntax: step, range, range with step, list or single value.
fn parse_values(kind: FieldKind, input: &str) -> Result<BTreeSet<FieldValue>> {
    let (min, max) = kind.min_max();
    let valid_step = |step: FieldValue| step >= 1 && step <= max - min + 1;
    let in_bounds = |value: FieldValue| value >= min && value <= max;

    if let Some((base, step)) = input.split_once('/') {
        // start-end/step
        if let Some((start, end)) = base.split_once('-') {
            if let (Some(start), Some(end), Some(step)) = (parse_number(start), parse_number(end), parse_number(step)) {
                if !in_bounds(start) || !in_bounds(end) || start > end || !valid_step(step) {
                    return Err(kind.error(format!("invalid range/step: {input}")));
                }
                return Ok(SeriesWithStep::new(start, end, step).collect());
            }
        } else {
            // start/step or */step
            let start = if base == "*" { Some(min) } else { parse_number(base) };
            if let (Some(start), Some(step)) = (start, parse_number(step)) {
                if !valid_step(step) {
                    return Err(kind.error(format!("invalid step value: {input}")));
                }
                if !in_bounds(start) {
                    return Err(kind.error(format!("invalid start value: {input}")));
                }
                return Ok(SeriesWithStep::new(start, max, step).collect());
            }
        }
    } else if let Some((start, end)) = input.split_once('-') {
        if let (Some(start), Some(end)) = (parse_number(start), parse_number(end)) {
            if !in_bounds(start) || !in_bounds(end) || start > end {
                return Err(kind.error(format!("invalid range: {input}")));
            }
            return Ok((start..=end).collect());
        }
    } else if input.split(',').all(|value| parse_number(value).is_some()) {
        let mut values = BTreeSet::new();
        for value in input.split(',') {
            let number = parse_number(value).unwrap_or_default();
            if kind == FieldKind::Years && !(MIN_YEAR..=MAX_YEAR).contains(&number) {
                return Err(kind.error(format!(
                    "year must be between {MIN_YEAR} and {MAX_YEAR}, got: {number}"
                )));
            }
            if !in_bounds(number) {
                return Err(kind.error(format!("invalid value: {value}")));
            }
            values.insert(number);
        }
        return Ok(values);
    }

    Err(kind.error(format!("{input} not supported")))
}
