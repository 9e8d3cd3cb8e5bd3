use crate::{error::DaysConflict, CronError, FieldKind, ParsedField, Result};
use std::{fmt::Display, str::FromStr};

/// Parsed and validated Quartz cron expression.
///
/// The value is immutable and can be shared between threads freely.
/// Use [`ParsedExpression::parse`] or one of `try_from`/`from_str` to construct it,
/// and methods like [`ParsedExpression::next_after`] to get occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct ParsedExpression {
    second: ParsedField,
    minute: ParsedField,
    hour: ParsedField,
    day_of_month: ParsedField,
    month: ParsedField,
    day_of_week: ParsedField,
    year: ParsedField,
}

impl ParsedExpression {
    /// Parses and validates provided cron `expression`.
    ///
    /// Expression consists of 6 or 7 fields separated by whitespaces:
    /// `seconds minutes hours day-of-month month day-of-week [year]`.
    /// Exactly one of day-of-month and day-of-week must be `?`.
    ///
    /// Returns [`CronError`] if the expression is empty, has wrong number of fields,
    /// violates days exclusivity rule or contains invalid field.
    pub fn parse(expression: &str) -> Result<Self> {
        let result = Self::parse_impl(expression);
        match &result {
            Ok(parsed) => log::debug!("parsed cron expression '{expression}' as '{parsed}'"),
            Err(err) => log::debug!("unable to parse cron expression '{expression}': {err}"),
        }
        result
    }

    fn parse_impl(expression: &str) -> Result<Self> {
        let mut elements: Vec<&str> = expression.split_whitespace().collect();
        match elements.len() {
            0 => return Err(CronError::EmptyExpression),
            6 => elements.push(""),
            7 => {}
            count => return Err(CronError::FieldCount(count)),
        }

        match (elements[3] == "?", elements[5] == "?") {
            (false, false) => return Err(CronError::MutualExclusivity(DaysConflict::BothSpecified)),
            (true, true) => return Err(CronError::MutualExclusivity(DaysConflict::NeitherSpecified)),
            _ => {}
        }

        Ok(Self {
            second: ParsedField::parse(FieldKind::Seconds, elements[0])?,
            minute: ParsedField::parse(FieldKind::Minutes, elements[1])?,
            hour: ParsedField::parse(FieldKind::Hours, elements[2])?,
            day_of_month: ParsedField::parse(FieldKind::DaysOfMonth, elements[3])?,
            month: ParsedField::parse(FieldKind::Months, elements[4])?,
            day_of_week: ParsedField::parse(FieldKind::DaysOfWeek, elements[5])?,
            year: ParsedField::parse(FieldKind::Years, elements[6])?,
        })
    }

    /// Seconds field.
    #[inline]
    pub fn second(&self) -> &ParsedField {
        &self.second
    }

    /// Minutes field.
    #[inline]
    pub fn minute(&self) -> &ParsedField {
        &self.minute
    }

    /// Hours field.
    #[inline]
    pub fn hour(&self) -> &ParsedField {
        &self.hour
    }

    /// Day of month field.
    #[inline]
    pub fn day_of_month(&self) -> &ParsedField {
        &self.day_of_month
    }

    /// Month field.
    #[inline]
    pub fn month(&self) -> &ParsedField {
        &self.month
    }

    /// Day of week field.
    #[inline]
    pub fn day_of_week(&self) -> &ParsedField {
        &self.day_of_week
    }

    /// Year field, [`ParsedField::UnspecifiedYear`] if it was omitted.
    #[inline]
    pub fn year(&self) -> &ParsedField {
        &self.year
    }

    fn fields(&self) -> [(FieldKind, &ParsedField); 7] {
        [
            (FieldKind::Seconds, &self.second),
            (FieldKind::Minutes, &self.minute),
            (FieldKind::Hours, &self.hour),
            (FieldKind::DaysOfMonth, &self.day_of_month),
            (FieldKind::Months, &self.month),
            (FieldKind::DaysOfWeek, &self.day_of_week),
            (FieldKind::Years, &self.year),
        ]
    }
}

/// Canonical text of the single field, empty for unspecified year.
fn format_field(kind: FieldKind, field: &ParsedField) -> String {
    match field {
        ParsedField::Static(values) => {
            let (min, max) = kind.min_max();
            if values.len() == (max - min + 1) as usize {
                "*".to_string()
            } else {
                values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
            }
        }
        ParsedField::NoSpecificValue => "?".to_string(),
        ParsedField::LastDay => "L".to_string(),
        ParsedField::LastDayOffset(offset) => format!("L-{offset}"),
        ParsedField::WeekdayNearest(day) => format!("{day}W"),
        ParsedField::LastWeekdayOfMonth => "LW".to_string(),
        ParsedField::LastWeekday(day) => format!("{day}L"),
        ParsedField::NthWeekday { day, occurrence } => format!("{day}#{occurrence}"),
        ParsedField::UnspecifiedYear => String::new(),
    }
}

impl From<ParsedExpression> for String {
    fn from(value: ParsedExpression) -> Self {
        value.to_string()
    }
}

impl From<&ParsedExpression> for String {
    fn from(value: &ParsedExpression) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ParsedExpression {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&String> for ParsedExpression {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for ParsedExpression {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl FromStr for ParsedExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for ParsedExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements: Vec<String> = self
            .fields()
            .into_iter()
            .map(|(kind, field)| format_field(kind, field))
            .filter(|element| !element.is_empty())
            .collect();
        write!(f, "{}", elements.join(" "))
    }
}
