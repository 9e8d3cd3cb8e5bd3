//! Human-readable descriptions of cron expressions.
use crate::{FieldKind, FieldValue, ParsedField};
use std::collections::BTreeSet;

/// Returned by [`describe`] and [`describe_with`] when no description is available.
pub const NO_DESCRIPTION: &str = "-";

const DAY_NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const ORDINALS: [&str; 6] = ["first", "second", "third", "fourth", "fifth", "sixth"];

/// Formatter which turns cron expression text into a sentence.
pub trait Describer {
    /// Returns description of the `expression` in the requested `locale`,
    /// or `None` if the expression or locale isn't supported.
    fn describe(&self, expression: &str, locale: Option<&str>) -> Option<String>;
}

/// Describes expression using [`EnglishDescriber`].
///
/// Never fails: returns [`NO_DESCRIPTION`] for empty input or if the description can't be produced.
pub fn describe(expression: &str, locale: Option<&str>) -> String {
    describe_with(expression, locale, &EnglishDescriber)
}

/// Describes expression using provided `describer`.
///
/// Never fails: returns [`NO_DESCRIPTION`] for empty input or if the description can't be produced.
pub fn describe_with(expression: &str, locale: Option<&str>, describer: &impl Describer) -> String {
    if expression.trim().is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    match describer.describe(expression, locale) {
        Some(description) if !description.is_empty() => description,
        _ => {
            log::debug!("no description for cron expression '{expression}', locale {locale:?}");
            NO_DESCRIPTION.to_string()
        }
    }
}

/// Built-in English describer.
///
/// Supports locales `None` and `en*` only. Fields are parsed one by one without cross-field validation:
/// fields which don't parse are left out, and expressions with no usable field get no description.
/// Five fields expression is treated as one without seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EnglishDescriber;

impl Describer for EnglishDescriber {
    fn describe(&self, expression: &str, locale: Option<&str>) -> Option<String> {
        if !is_english(locale) {
            return None;
        }

        let fields = LenientFields::parse(expression)?;
        let mut parts = vec![describe_time(&fields)];
        parts.extend(describe_days(&fields));
        if let Some(ParsedField::Static(months)) = &fields.month {
            if !is_full(FieldKind::Months, months) {
                parts.push(format!("only in {}", join(months.iter().map(|m| name_of(&MONTH_NAMES, *m)))));
            }
        }
        if let Some(ParsedField::Static(years)) = &fields.year {
            if !is_full(FieldKind::Years, years) {
                parts.push(format!("only in {}", join(years.iter().map(ToString::to_string))));
            }
        }

        parts.retain(|part| !part.is_empty());
        let sentence = parts.join(", ");
        let mut chars = sentence.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars).collect())
    }
}

/// Fields of an expression parsed independently of each other, `None` stands for unparsable field.
#[derive(Debug)]
struct LenientFields {
    second: Option<ParsedField>,
    minute: Option<ParsedField>,
    hour: Option<ParsedField>,
    day_of_month: Option<ParsedField>,
    month: Option<ParsedField>,
    day_of_week: Option<ParsedField>,
    year: Option<ParsedField>,
}

impl LenientFields {
    /// Returns `None` if the number of fields is wrong or none of them parses.
    fn parse(expression: &str) -> Option<Self> {
        let mut tokens: Vec<&str> = expression.split_whitespace().collect();
        match tokens.len() {
            5 => tokens.insert(0, "0"),
            6 | 7 => {}
            _ => return None,
        }

        let field = |kind, index: usize| {
            let token = tokens.get(index).copied().unwrap_or_default();
            ParsedField::parse(kind, token)
                .inspect_err(|err| log::trace!("field '{token}' is left out of description: {err}"))
                .ok()
        };
        let fields = Self {
            second: field(FieldKind::Seconds, 0),
            minute: field(FieldKind::Minutes, 1),
            hour: field(FieldKind::Hours, 2),
            day_of_month: field(FieldKind::DaysOfMonth, 3),
            month: field(FieldKind::Months, 4),
            day_of_week: field(FieldKind::DaysOfWeek, 5),
            year: field(FieldKind::Years, 6),
        };

        let parsed = [
            &fields.second,
            &fields.minute,
            &fields.hour,
            &fields.day_of_month,
            &fields.month,
            &fields.day_of_week,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count();

        (parsed > 0).then_some(fields)
    }
}

fn is_english(locale: Option<&str>) -> bool {
    match locale {
        None => true,
        Some(locale) => locale.get(..2).is_some_and(|lang| lang.eq_ignore_ascii_case("en")),
    }
}

fn is_full(kind: FieldKind, values: &BTreeSet<FieldValue>) -> bool {
    let (min, max) = kind.min_max();
    values.len() == (max - min + 1) as usize
}

fn name_of(names: &[&str], value: FieldValue) -> String {
    names
        .get((value as usize).wrapping_sub(1))
        .map_or_else(|| value.to_string(), ToString::to_string)
}

/// Joins items as `a`, `a and b` or `a, b and c`.
fn join(items: impl IntoIterator<Item = String>) -> String {
    let mut items: Vec<String> = items.into_iter().collect();
    match items.len() {
        0 => String::new(),
        1 => items.remove(0),
        _ => {
            let last = items.pop().unwrap_or_default();
            format!("{} and {last}", items.join(", "))
        }
    }
}

fn single(field: &Option<ParsedField>) -> Option<FieldValue> {
    match field {
        Some(ParsedField::Static(values)) if values.len() == 1 => values.first().copied(),
        _ => None,
    }
}

fn describe_time(fields: &LenientFields) -> String {
    if let (Some(hour), Some(minute), Some(second)) =
        (single(&fields.hour), single(&fields.minute), single(&fields.second))
    {
        return format!("at {hour:02}:{minute:02}:{second:02}");
    }

    let units = [
        (FieldKind::Seconds, &fields.second, "second"),
        (FieldKind::Minutes, &fields.minute, "minute"),
        (FieldKind::Hours, &fields.hour, "hour"),
    ];
    let mut parts = vec![];
    let mut finer_is_full = false;
    for (kind, field, unit) in units {
        let Some(ParsedField::Static(values)) = field else {
            continue;
        };
        if is_full(kind, values) {
            if !finer_is_full {
                parts.push(format!("every {unit}"));
            }
            finer_is_full = true;
        } else {
            let plural = if values.len() > 1 { "s" } else { "" };
            parts.push(format!("at {unit}{plural} {}", join(values.iter().map(ToString::to_string))));
            finer_is_full = false;
        }
    }

    parts.join(", ")
}

fn describe_days(fields: &LenientFields) -> Vec<String> {
    let mut parts = vec![];

    match &fields.day_of_month {
        Some(ParsedField::Static(days)) if !is_full(FieldKind::DaysOfMonth, days) => {
            let plural = if days.len() > 1 { "s" } else { "" };
            parts.push(format!("on day{plural} {} of the month", join(days.iter().map(ToString::to_string))));
        }
        Some(ParsedField::LastDay | ParsedField::LastDayOffset(0)) => {
            parts.push("on the last day of the month".to_string())
        }
        Some(ParsedField::LastDayOffset(1)) => parts.push("1 day before the last day of the month".to_string()),
        Some(ParsedField::LastDayOffset(offset)) => {
            parts.push(format!("{offset} days before the last day of the month"))
        }
        Some(ParsedField::WeekdayNearest(day)) => {
            parts.push(format!("on the weekday nearest day {day} of the month"))
        }
        Some(ParsedField::LastWeekdayOfMonth) => parts.push("on the last weekday of the month".to_string()),
        _ => {}
    }

    match &fields.day_of_week {
        Some(ParsedField::Static(days)) if !is_full(FieldKind::DaysOfWeek, days) => {
            parts.push(format!("only on {}", join(days.iter().map(|d| name_of(&DAY_NAMES, *d)))))
        }
        Some(ParsedField::LastWeekday(day)) => {
            parts.push(format!("on the last {} of the month", name_of(&DAY_NAMES, *day)))
        }
        Some(ParsedField::NthWeekday { day, occurrence }) => parts.push(format!(
            "on the {} {} of the month",
            name_of(&ORDINALS, *occurrence),
            name_of(&DAY_NAMES, *day)
        )),
        _ => {}
    }

    parts
}
