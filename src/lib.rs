//! Quartz cron expressions parser and next occurrence calculator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This crate is intended to:
//! - parse and validate [Quartz](https://www.quartz-scheduler.org/documentation/quartz-2.3.0/tutorials/crontrigger.html)
//!   flavored 6/7-fields cron expressions, including all special day syntaxes;
//! - calculate the next occurrence of the expression after a given time, or a series of occurrences within a range;
//! - produce a human-readable description of the expression.
//!
//! All calculations are performed on naive (timezone-less) local time, see [chrono::NaiveDateTime].
//!
//! _This is not a cron jobs scheduler or runner._
//!
//! ## Cron expression format
//!
//! Expression consists of 6 or 7 fields separated by whitespaces: seconds, minutes, hours, day of month, month,
//! day of week and optional year. If year is omitted, any year matches.
//!
//! The table below describes valid values and patterns of each field:
//!
//! | Field        | Required | Allowed values  | Allowed special characters |
//! |--------------|----------|-----------------|----------------------------|
//! | Seconds      | Yes      | 0-59            | * , - /                    |
//! | Minutes      | Yes      | 0-59            | * , - /                    |
//! | Hours        | Yes      | 0-23            | * , - /                    |
//! | Day of Month | Yes      | 1-31            | * , - / ? L W              |
//! | Month        | Yes      | 1-12 or JAN-DEC | * , - /                    |
//! | Day of Week  | Yes      | 1-7 or SUN-SAT  | * , - / ? L #              |
//! | Year         | No       | 1970-2099       | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `10/5`, `30-59/2`;
//! - `L` - last day of the month (`L`), N days before the last day (`L-3`), last weekday of the month (`LW`)
//!   or last particular day of the week (`6L` or `FRIL`); standalone `L` in day of week means Saturday;
//! - `W` - the weekday (not Sunday or Saturday), nearest to the specified day of month in the same month, i.e. `22W`;
//! - `#` - N-th particular day of the week in the month, i.e. `fri#1`, `2#4`;
//! - `?` - no specific value: exactly one of day of month and day of week must be `?`.
//!
//! Lists, ranges and steps can't be combined with each other or with `L`, `W` and `#`.
//! Aliases are case-insensitive. Days of the week are numbered from `1` (Sunday) to `7` (Saturday).
//!
//! ## How to use
//!
//! The central entity of the crate is a [`ParsedExpression`], which has three basic methods:
//! - [parse()](ParsedExpression::parse): parses and validates provided expression;
//! - [next_after()](ParsedExpression::next_after): returns time of the next occurrence strictly after the provided time;
//! - [occurrences()](ParsedExpression::occurrences): returns an `Iterator` over consecutive occurrences.
//!
//! Functions [`next_occurrence`], [`occurrences_between`] and [`describe`] work with expression text directly.
//!
//! ### Example with `next_occurrence`
//! ```rust
//! use chrono::NaiveDate;
//! use qcron::{next_occurrence, Result};
//!
//! fn main() -> Result<()> {
//!     let from = NaiveDate::from_ymd_opt(2000, 2, 20).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//!     // Noon of the last day of the month
//!     let next = next_occurrence("0 0 12 L * ?", &from)?;
//!     assert_eq!(next, NaiveDate::from_ymd_opt(2000, 2, 29).unwrap().and_hms_opt(12, 0, 0));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Example with `occurrences`
//! ```rust
//! use chrono::NaiveDate;
//! use qcron::{ParsedExpression, Result};
//!
//! fn main() -> Result<()> {
//!     let expression = ParsedExpression::parse("0 15 10 ? * 6#3")?;
//!     let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//!     // Third Friday of the next three months
//!     let next: Vec<String> = expression.occurrences(&from).take(3).map(|t| t.to_string()).collect();
//!     assert_eq!(next, ["2024-01-19 10:15:00", "2024-02-16 10:15:00", "2024-03-15 10:15:00"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Example with `describe`
//! ```rust
//! use qcron::{describe, NO_DESCRIPTION};
//!
//! assert_eq!(describe("0 0 12 ? * 6L", None), "At 12:00:00, on the last Friday of the month");
//! assert_eq!(describe("0 0 12 ? * 6L", Some("de")), NO_DESCRIPTION);
//! ```
//!
//! ## Logging
//!
//! The crate logs parsing results and search details via the [log](https://crates.io/crates/log) facade
//! on `debug` and `trace` levels; install any compatible logger to see them.
//!
//! # Feature flags
//! * `clock` (default): enables [`next_occurrence_from_now`] which uses the local wall clock.
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`ParsedExpression`].

/// Calendar facts used by the evaluator and the search.
pub mod calendar;
/// Human-readable descriptions.
pub mod describe;
/// Crate specific Error implementation.
pub mod error;
mod evaluate;
/// Parsed cron expression.
pub mod expression;
/// Single field model and parser.
pub mod field;
/// Occurrences search.
pub mod search;
mod series;

// Re-export of public entities.
pub use calendar::{Calendar, Gregorian};
pub use describe::{describe, describe_with, Describer, EnglishDescriber, NO_DESCRIPTION};
pub use error::{CronError, DaysConflict};
pub use expression::ParsedExpression;
pub use field::{FieldKind, FieldValue, ParsedField, MAX_YEAR, MIN_YEAR};
pub use search::{Occurrences, ANY_YEAR_HORIZON, DEFAULT_MAX_OCCURRENCES, STATIC_YEAR_HORIZON};

use chrono::NaiveDateTime;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;

/// Parses and validates cron `expression`, see [`ParsedExpression::parse`].
#[inline]
pub fn parse(expression: &str) -> Result<ParsedExpression> {
    ParsedExpression::parse(expression)
}

/// Parses `expression` and returns time of its next occurrence strictly after `from`.
///
/// Returns `Ok(None)` if there is no occurrence within the search horizon.
pub fn next_occurrence(expression: &str, from: &NaiveDateTime) -> Result<Option<NaiveDateTime>> {
    Ok(ParsedExpression::parse(expression)?.next_after(from))
}

/// Parses `expression` and returns time of its next occurrence after the current local time.
#[cfg(feature = "clock")]
pub fn next_occurrence_from_now(expression: &str) -> Result<Option<NaiveDateTime>> {
    next_occurrence(expression, &chrono::Local::now().naive_local())
}

/// Parses `expression` and returns up to `max_count` ascending occurrences strictly between `from` and `to`.
///
/// Use [`DEFAULT_MAX_OCCURRENCES`] as `max_count` if there is no specific limit.
pub fn occurrences_between(
    expression: &str,
    from: &NaiveDateTime,
    to: &NaiveDateTime,
    max_count: usize,
) -> Result<Vec<NaiveDateTime>> {
    Ok(ParsedExpression::parse(expression)?.between(from, to, max_count))
}
