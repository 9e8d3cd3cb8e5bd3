use crate::field::FieldKind;
use std::fmt::Display;
use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Expression is empty or contains whitespaces only.
    #[error("empty cron expression")]
    EmptyExpression,
    /// Expression has wrong number of fields.
    #[error("invalid cron expression: expected 6 or 7 fields, got {0}")]
    FieldCount(usize),
    /// Day of month and day of week fields are both specified or both omitted.
    #[error("{0}")]
    MutualExclusivity(DaysConflict),
    /// Single field of the expression is invalid.
    #[error("invalid {field} expression: {detail}")]
    FieldSyntax {
        /// Field which caused the error.
        field: FieldKind,
        /// Offending fragment and reason.
        detail: String,
    },
}

/// Kind of conflict between day of month and day of week fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DaysConflict {
    /// Neither of the fields is `?`.
    BothSpecified,
    /// Both fields are `?`.
    NeitherSpecified,
}

impl Display for DaysConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaysConflict::BothSpecified => write!(
                f,
                "cannot specify both day-of-month and day-of-week, use '?' in one of these fields"
            ),
            DaysConflict::NeitherSpecified => write!(
                f,
                "at least one of day-of-month or day-of-week must be specified (not '?')"
            ),
        }
    }
}

impl CronError {
    pub(crate) fn syntax(field: FieldKind, detail: impl Into<String>) -> Self {
        Self::FieldSyntax {
            field,
            detail: detail.into(),
        }
    }
}
