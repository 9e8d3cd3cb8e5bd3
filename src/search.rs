use crate::{
    calendar::{Calendar, Gregorian},
    FieldValue, ParsedExpression,
};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use std::iter::FusedIterator;

/// Search horizon in years for expressions with explicit year field.
pub const STATIC_YEAR_HORIZON: u32 = 130;
/// Search horizon in years for expressions without year field.
pub const ANY_YEAR_HORIZON: u32 = 4;
/// Default cap for the number of occurrences returned by a range query.
pub const DEFAULT_MAX_OCCURRENCES: usize = 1000;

impl ParsedExpression {
    /// Returns time of the next occurrence strictly after `from`,
    /// or `None` if there is no occurrence within the search horizon.
    #[inline]
    pub fn next_after(&self, from: &NaiveDateTime) -> Option<NaiveDateTime> {
        self.next_after_in(&Gregorian, from)
    }

    /// Same as [`ParsedExpression::next_after`] but uses provided `calendar`.
    pub fn next_after_in(&self, calendar: &impl Calendar, from: &NaiveDateTime) -> Option<NaiveDateTime> {
        let horizon_years = if self.year().years().is_some() {
            STATIC_YEAR_HORIZON
        } else {
            ANY_YEAR_HORIZON
        };
        let horizon = from
            .checked_add_months(Months::new(horizon_years * 12))
            .unwrap_or(NaiveDateTime::MAX);

        let months = self.month().evaluate(calendar, from.year(), from.month());
        let hours = self.hour().evaluate(calendar, from.year(), from.month());
        let minutes = self.minute().evaluate(calendar, from.year(), from.month());
        let seconds = self.second().evaluate(calendar, from.year(), from.month());

        let mut cursor = from.checked_add_signed(TimeDelta::seconds(1))?;
        while cursor < horizon {
            let year = cursor.year();
            let month = cursor.month();

            if let Some(years) = self.year().years() {
                if !u32::try_from(year).is_ok_and(|year| years.contains(&year)) {
                    let after = u32::try_from(year + 1).unwrap_or_default();
                    let Some(&next_year) = years.range(after..).next() else {
                        log::trace!("no valid year after {year}");
                        return None;
                    };
                    log::trace!("jump from year {year} to {next_year}");
                    cursor = first_day_of(next_year as i32, 1)?;
                    continue;
                }
            }

            if !months.contains(&month) {
                cursor = match months.iter().find(|&&m| m > month) {
                    Some(&next_month) => first_day_of(year, next_month)?,
                    None => first_day_of(year + 1, 1)?,
                };
                log::trace!("jump from {year:04}-{month:02} to {}", cursor.date());
                continue;
            }

            let days = if self.day_of_month().is_no_specific_value() {
                self.day_of_week().days_of_week(calendar, year, month)
            } else {
                self.day_of_month().days_of_month(calendar, year, month)
            };

            for day in days.into_iter().filter(|&day| day >= cursor.day()) {
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                if let Some(next) = earliest_time_on(date, from, &hours, &minutes, &seconds) {
                    return Some(next);
                }
            }

            cursor = if month == 12 {
                first_day_of(year + 1, 1)?
            } else {
                first_day_of(year, month + 1)?
            };
        }

        log::debug!("search horizon of {horizon_years} years from {from} is exhausted for '{}'", self);
        None
    }

    /// Returns iterator of occurrences strictly after `from`, each one is searched from the previous.
    #[inline]
    pub fn occurrences(&self, from: &NaiveDateTime) -> Occurrences<'_, Gregorian> {
        self.occurrences_in(&Gregorian, from)
    }

    /// Same as [`ParsedExpression::occurrences`] but uses provided `calendar`.
    #[inline]
    pub fn occurrences_in<'a, C: Calendar>(&'a self, calendar: &'a C, from: &NaiveDateTime) -> Occurrences<'a, C> {
        Occurrences {
            expression: self,
            calendar,
            cursor: Some(*from),
        }
    }

    /// Returns up to `max_count` ascending occurrences within the open interval `(from, to)`.
    #[inline]
    pub fn between(&self, from: &NaiveDateTime, to: &NaiveDateTime, max_count: usize) -> Vec<NaiveDateTime> {
        self.between_in(&Gregorian, from, to, max_count)
    }

    /// Same as [`ParsedExpression::between`] but uses provided `calendar`.
    pub fn between_in(
        &self,
        calendar: &impl Calendar,
        from: &NaiveDateTime,
        to: &NaiveDateTime,
        max_count: usize,
    ) -> Vec<NaiveDateTime> {
        self.occurrences_in(calendar, from)
            .take_while(|next| next < to)
            .take(max_count)
            .collect()
    }
}

/// Iterator over consecutive occurrences of the expression.
#[derive(Debug, Clone)]
pub struct Occurrences<'a, C: Calendar> {
    expression: &'a ParsedExpression,
    calendar: &'a C,
    cursor: Option<NaiveDateTime>,
}

impl<C: Calendar> Iterator for Occurrences<'_, C> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        self.cursor = self.expression.next_after_in(self.calendar, &current);
        self.cursor
    }
}

impl<C: Calendar> FusedIterator for Occurrences<'_, C> {}

#[inline]
fn first_day_of(year: i32, month: FieldValue) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

/// Returns the first time on `date` which is strictly after `from`.
///
/// Components of `from` are taken into account only while all coarser components are equal.
fn earliest_time_on(
    date: NaiveDate,
    from: &NaiveDateTime,
    hours: &[FieldValue],
    minutes: &[FieldValue],
    seconds: &[FieldValue],
) -> Option<NaiveDateTime> {
    let same_day = date == from.date();
    for &hour in hours {
        if same_day && hour < from.hour() {
            continue;
        }
        let same_hour = same_day && hour == from.hour();
        for &minute in minutes {
            if same_hour && minute < from.minute() {
                continue;
            }
            let same_minute = same_hour && minute == from.minute();
            for &second in seconds {
                if same_minute && second <= from.second() {
                    continue;
                }
                return date.and_hms_opt(hour, minute, second);
            }
        }
    }

    None
}
