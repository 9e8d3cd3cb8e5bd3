//! Calendar facts required to resolve day-of-month and day-of-week specials.
use crate::field::FieldValue;
use chrono::{Datelike, NaiveDate};

/// Sunday in 1-based week numbering.
pub const SUNDAY: FieldValue = 1;
/// Saturday in 1-based week numbering.
pub const SATURDAY: FieldValue = 7;

/// Calendar capability used by the field evaluator and the occurrence search.
///
/// Days of week are numbered from `1` (Sunday) to `7` (Saturday).
/// Implementors provide two primitives, everything else is derived from them.
pub trait Calendar {
    /// Returns number of days in the specified month.
    fn days_in_month(&self, year: i32, month: FieldValue) -> FieldValue;

    /// Returns day of week (`1..=7`, Sunday is `1`) of the specified date.
    fn weekday(&self, year: i32, month: FieldValue, day: FieldValue) -> FieldValue;

    /// Returns `true` if the date is Saturday or Sunday.
    fn is_weekend(&self, year: i32, month: FieldValue, day: FieldValue) -> bool {
        matches!(self.weekday(year, month, day), SUNDAY | SATURDAY)
    }

    /// Returns day in the month of the last specified day of the week.
    ///
    /// `dow` is taken modulo 7, so `7` and `0` both mean Saturday.
    fn last_weekday(&self, year: i32, month: FieldValue, dow: FieldValue) -> FieldValue {
        let last_day = self.days_in_month(year, month);
        let days_back = (self.weekday(year, month, last_day) + 7 - dow % 7) % 7;
        last_day - days_back
    }

    /// Returns day in the month of the N-th specified day of the week,
    /// or `None` if the month has less than N such days.
    fn nth_weekday(&self, year: i32, month: FieldValue, dow: FieldValue, n: FieldValue) -> Option<FieldValue> {
        let first_dow = self.weekday(year, month, 1);
        let day = 1 + (dow + 7 - first_dow) % 7 + n.checked_sub(1)? * 7;

        (day <= self.days_in_month(year, month)).then_some(day)
    }

    /// Returns the weekday (not Saturday or Sunday) nearest to the specified day, never leaving the month.
    ///
    /// Day beyond the end of the month is clamped to the last day.
    fn nearest_weekday(&self, year: i32, month: FieldValue, day: FieldValue) -> FieldValue {
        let days_in_month = self.days_in_month(year, month);
        let day = day.clamp(1, days_in_month);

        match self.weekday(year, month, day) {
            SATURDAY if day > 1 => day - 1,
            SATURDAY if day + 2 <= days_in_month => day + 2,
            SUNDAY if day < days_in_month => day + 1,
            SUNDAY if day > 2 => day - 2,
            _ => day,
        }
    }

    /// Returns the last weekday (not Saturday or Sunday) of the month.
    fn last_business_day(&self, year: i32, month: FieldValue) -> FieldValue {
        let last_day = self.days_in_month(year, month);
        match self.weekday(year, month, last_day) {
            SATURDAY => last_day - 1,
            SUNDAY => last_day - 2,
            _ => last_day,
        }
    }
}

/// Proleptic Gregorian calendar backed by [chrono](https://crates.io/crates/chrono).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gregorian;

impl Calendar for Gregorian {
    /// Panics if `month` isn't in `1..=12`.
    fn days_in_month(&self, year: i32, month: FieldValue) -> FieldValue {
        if month == 0 || month > 12 {
            panic!("Invalid month: {month}");
        }

        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .map(|last| last.day())
            .unwrap_or_else(|| panic!("Invalid month: {year:04}-{month:02}"))
    }

    /// Panics if the date doesn't exist.
    fn weekday(&self, year: i32, month: FieldValue, day: FieldValue) -> FieldValue {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| date.weekday().number_from_sunday())
            .unwrap_or_else(|| panic!("Invalid date: {year:04}-{month:02}-{day:02}"))
    }
}
