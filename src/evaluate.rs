use crate::{calendar::Calendar, FieldValue, ParsedField};
use std::collections::BTreeSet;

impl ParsedField {
    /// Resolves the field into the ascending list of concrete values for the specified month.
    ///
    /// Plain sets are returned as is (for day of week these are weekday numbers).
    /// Day specials resolve into days of the month, an empty list means "no match in this month".
    /// `year` and `month` matter for day specials only.
    pub fn evaluate(&self, calendar: &impl Calendar, year: i32, month: FieldValue) -> Vec<FieldValue> {
        match self {
            Self::Static(values) => values.iter().copied().collect(),
            Self::NoSpecificValue | Self::UnspecifiedYear => vec![],
            Self::LastDay => vec![calendar.days_in_month(year, month)],
            Self::LastDayOffset(offset) => {
                let last_day = calendar.days_in_month(year, month);
                if *offset < last_day {
                    vec![last_day - offset]
                } else {
                    vec![]
                }
            }
            Self::WeekdayNearest(day) => vec![calendar.nearest_weekday(year, month, *day)],
            Self::LastWeekdayOfMonth => vec![calendar.last_business_day(year, month)],
            Self::LastWeekday(dow) => vec![calendar.last_weekday(year, month, *dow)],
            Self::NthWeekday { day, occurrence } => {
                calendar.nth_weekday(year, month, *day, *occurrence).into_iter().collect()
            }
        }
    }

    /// Returns the finite set of allowed years, or `None` if any year matches.
    pub fn years(&self) -> Option<&BTreeSet<FieldValue>> {
        match self {
            Self::Static(years) => Some(years),
            _ => None,
        }
    }

    /// Returns days of the month (ascending) matched by the day-of-month field.
    pub(crate) fn days_of_month(&self, calendar: &impl Calendar, year: i32, month: FieldValue) -> Vec<FieldValue> {
        let last_day = calendar.days_in_month(year, month);
        let mut days = self.evaluate(calendar, year, month);
        days.retain(|day| (1..=last_day).contains(day));
        days
    }

    /// Returns days of the month (ascending) matched by the day-of-week field.
    pub(crate) fn days_of_week(&self, calendar: &impl Calendar, year: i32, month: FieldValue) -> Vec<FieldValue> {
        match self {
            Self::Static(weekdays) => (1..=calendar.days_in_month(year, month))
                .filter(|day| weekdays.contains(&calendar.weekday(year, month, *day)))
                .collect(),
            _ => self.evaluate(calendar, year, month),
        }
    }
}
