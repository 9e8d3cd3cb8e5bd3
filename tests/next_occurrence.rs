use chrono::{Datelike, NaiveDateTime};
use qcron::{next_occurrence, occurrences_between, ParsedExpression, DEFAULT_MAX_OCCURRENCES};
use rstest::rstest;
use std::time::Duration;

fn dt(value: &str) -> NaiveDateTime {
    value.parse().unwrap()
}

#[rstest]
// daily
#[case("0 0 12 * * ?", "2000-02-01T09:00:00", vec!["2000-02-01T12:00:00", "2000-02-02T12:00:00", "2000-02-03T12:00:00"])]
#[case("0 15 10 ? * *", "2000-02-01T09:00:00", vec!["2000-02-01T10:15:00", "2000-02-02T10:15:00", "2000-02-03T10:15:00"])]
#[case("0 15 10 * * ? *", "2000-02-01T09:00:00", vec!["2000-02-01T10:15:00", "2000-02-02T10:15:00"])]
#[case("0 15 10 * * ? 2005", "2005-02-01T09:00:00", vec!["2005-02-01T10:15:00", "2005-02-02T10:15:00"])]
#[case("0 0 12 * * ?", "2000-02-01T13:00:00", vec!["2000-02-02T12:00:00", "2000-02-03T12:00:00"])]
#[case("0 0 12 * * ?", "2000-02-29T13:00:00", vec!["2000-03-01T12:00:00", "2000-03-02T12:00:00"])]
#[case("0 0 12 * * ?", "2000-12-31T13:00:00", vec!["2001-01-01T12:00:00", "2001-01-02T12:00:00"])]
// minutes
#[case("0 * 14 * * ?", "2000-02-01T14:30:00", vec!["2000-02-01T14:31:00", "2000-02-01T14:32:00", "2000-02-01T14:33:00"])]
#[case("0 0/5 14 * * ?", "2000-02-01T14:07:00", vec!["2000-02-01T14:10:00", "2000-02-01T14:15:00", "2000-02-01T14:20:00"])]
#[case("0 0/5 14,18 * * ?", "2000-02-01T15:00:00", vec!["2000-02-01T18:00:00", "2000-02-01T18:05:00", "2000-02-01T18:10:00"])]
#[case(
    "0 0-5 14 * * ?",
    "2000-02-01T14:03:00",
    vec!["2000-02-01T14:04:00", "2000-02-01T14:05:00", "2000-02-02T14:00:00", "2000-02-02T14:01:00"]
)]
#[case(
    "0 0,30 14 * * ?",
    "2022-01-01T13:00:00",
    vec!["2022-01-01T14:00:00", "2022-01-01T14:30:00", "2022-01-02T14:00:00", "2022-01-02T14:30:00"]
)]
// days of week
#[case(
    "0 10,44 14 ? 3 WED",
    "2000-03-01T00:00:00",
    vec!["2000-03-01T14:10:00", "2000-03-01T14:44:00", "2000-03-08T14:10:00", "2000-03-08T14:44:00"]
)]
#[case(
    "0 15 10 ? * MON-FRI",
    "2000-02-04T11:00:00",
    vec!["2000-02-07T10:15:00", "2000-02-08T10:15:00", "2000-02-09T10:15:00", "2000-02-10T10:15:00", "2000-02-11T10:15:00", "2000-02-14T10:15:00"]
)]
#[case(
    "0 0 12 ? * MON,WED,FRI",
    "2022-01-01T12:00:00",
    vec!["2022-01-03T12:00:00", "2022-01-05T12:00:00", "2022-01-07T12:00:00", "2022-01-10T12:00:00"]
)]
// days of month
#[case("0 15 10 15 * ?", "2000-02-01T00:00:00", vec!["2000-02-15T10:15:00", "2000-03-15T10:15:00", "2000-04-15T10:15:00"])]
#[case(
    "0 0 12 1/5 * ?",
    "2000-02-01T09:00:00",
    vec!["2000-02-01T12:00:00", "2000-02-06T12:00:00", "2000-02-11T12:00:00", "2000-02-16T12:00:00", "2000-02-21T12:00:00", "2000-02-26T12:00:00", "2000-03-01T12:00:00"]
)]
#[case("0 0 12 1 JAN,MAR,MAY ?", "2022-01-01T11:00:00", vec!["2022-01-01T12:00:00", "2022-03-01T12:00:00", "2022-05-01T12:00:00", "2023-01-01T12:00:00"])]
// last day
#[case("0 0 12 L * ?", "2000-02-20T00:00:00", vec!["2000-02-29T12:00:00", "2000-03-31T12:00:00", "2000-04-30T12:00:00"])]
#[case("0 15 10 L-2 * ?", "2000-02-01T00:00:00", vec!["2000-02-27T10:15:00", "2000-03-29T10:15:00", "2000-04-28T10:15:00"])]
#[case("0 15 10 ? * 6L", "2000-02-01T00:00:00", vec!["2000-02-25T10:15:00", "2000-03-31T10:15:00", "2000-04-28T10:15:00"])]
#[case("0 15 10 ? * 6L 2002-2005", "2000-02-01T00:00:00", vec!["2002-01-25T10:15:00", "2002-02-22T10:15:00"])]
// nth day of week
#[case("0 15 10 ? * 6#3", "2000-02-01T00:00:00", vec!["2000-02-18T10:15:00", "2000-03-17T10:15:00", "2000-04-21T10:15:00"])]
// special dates
#[case("0 11 11 11 11 ?", "2000-02-01T00:00:00", vec!["2000-11-11T11:11:00", "2001-11-11T11:11:00"])]
#[case("0 0 12 1 1 ? 2020-2022", "2020-01-01T11:00:00", vec!["2020-01-01T12:00:00", "2021-01-01T12:00:00", "2022-01-01T12:00:00"])]
#[case("0 0 12 1 1 ? 2020,2022,2024", "2020-01-01T11:00:00", vec!["2020-01-01T12:00:00", "2022-01-01T12:00:00", "2024-01-01T12:00:00"])]
#[timeout(Duration::from_secs(1))]
fn series_of_occurrences(#[case] expression: &str, #[case] from: &str, #[case] expected: Vec<&str>) {
    let mut current = dt(from);
    for expected in expected {
        let next = next_occurrence(expression, &current).unwrap();
        assert_eq!(next, Some(dt(expected)), "expression = {expression}, current = {current}");
        current = next.unwrap();
    }
}

#[rstest]
// nearest weekday never leaves the month
#[case("0 0 12 1W * ?", "1999-12-31T09:00:00", Some("2000-01-03T12:00:00"))]
#[case("0 0 12 31W * ?", "2021-01-01T09:00:00", Some("2021-01-29T12:00:00"))]
#[case("0 0 12 31W 7 ?", "2021-07-01T00:00:00", Some("2021-07-30T12:00:00"))]
#[case("0 0 12 15W 3 ?", "2023-03-01T00:00:00", Some("2023-03-15T12:00:00"))]
// nonexistent dates are skipped
#[case("0 0 12 30 * ?", "2000-02-01T09:00:00", Some("2000-03-30T12:00:00"))]
#[case("0 0 12 29 * ?", "2001-02-01T09:00:00", Some("2001-03-29T12:00:00"))]
#[case("0 0 12 29 * ?", "2000-02-01T09:00:00", Some("2000-02-29T12:00:00"))]
#[case("0 0 0 29 2 ? 2000", "1999-12-31T00:00:00", Some("2000-02-29T00:00:00"))]
#[case("0 0 0 29 2 ? 2001", "2001-01-01T00:00:00", None)]
#[case("0 0 12 30 2 ?", "2000-02-01T09:00:00", None)]
#[case("0 0 12 31 2 ?", "2022-01-01T00:00:00", None)]
#[case("0 0 0 31 4 ?", "2000-04-01T00:00:00", None)]
// absent nth weekday
#[case("0 0 12 ? * 4#5", "2000-02-01T09:00:00", Some("2000-03-29T12:00:00"))]
#[case("0 0 12 ? * 1#6", "2000-02-01T09:00:00", None)]
#[case("0 0 12 ? 5 5#5 2021", "2021-05-01T00:00:00", None)]
#[case("0 0 12 ? * 1#1", "2022-05-01T00:00:00", Some("2022-05-01T12:00:00"))]
// last weekday of month
#[case("0 0 12 LW 5 ?", "2021-05-01T00:00:00", Some("2021-05-31T12:00:00"))]
#[case("0 0 12 LW 7 ?", "2021-07-01T00:00:00", Some("2021-07-30T12:00:00"))]
#[case("0 0 12 ? * 6L", "2000-02-01T09:00:00", Some("2000-02-25T12:00:00"))]
#[case("0 0 12 ? * 6L", "2000-12-01T09:00:00", Some("2000-12-29T12:00:00"))]
// years
#[case("0 15 10 * * ? 2005", "2006-02-01T09:00:00", None)]
#[case("0 0 12 * * ? 1970", "1970-01-01T09:00:00", Some("1970-01-01T12:00:00"))]
#[case("0 0 12 * * ? 2099", "2099-01-01T09:00:00", Some("2099-01-01T12:00:00"))]
#[case("0 0 12 * * ? 2099", "2000-01-01T00:00:00", Some("2099-01-01T12:00:00"))]
// boundaries of the year
#[case("0 0 0 1 1 ?", "2020-12-31T23:59:59.999", Some("2021-01-01T00:00:00"))]
#[case("59 59 23 31 12 ?", "2021-12-31T23:59:58", Some("2021-12-31T23:59:59"))]
#[case("0 0-0 12 * * ?", "2022-01-01T11:59:00", Some("2022-01-01T12:00:00"))]
#[timeout(Duration::from_secs(1))]
fn single_occurrence(#[case] expression: &str, #[case] from: &str, #[case] expected: Option<&str>) {
    let from = dt(from);
    let next = next_occurrence(expression, &from).unwrap();

    assert_eq!(next, expected.map(dt), "expression = {expression}, from = {from}");
}

#[rstest]
#[case("0 0 12 * jan ?", "0 0 12 * JAN ?")]
#[case("0 0 12 * Jan ?", "0 0 12 * JAN ?")]
#[case("0 * 12 * * ?", "0 */1 12 * * ?")]
#[case("0 0 12 L * ?", "0 0 12 L-0 * ?")]
#[case("0 0 12 ? * FRIL", "0 0 12 ? * 6L")]
#[case("0  0  12  *  *  ?", "0 0 12 * * ?")]
#[timeout(Duration::from_secs(1))]
fn equivalent_expressions(#[case] left: &str, #[case] right: &str) {
    for from in ["2000-01-01T00:00:00", "2022-01-01T12:00:00", "2024-02-29T23:59:59"] {
        let from = dt(from);
        assert_eq!(next_occurrence(left, &from).unwrap(), next_occurrence(right, &from).unwrap(), "from = {from}");
    }
}

#[rstest]
#[case("0-59/2 * 12 * * ?", "2022-01-01T12:00:00")]
#[case("0 0/15 * ? * MON-FRI", "2024-02-28T17:45:00")]
#[case("0 0 12 ? * 2#2", "1999-12-31T23:59:59")]
#[case("*/7 */13 */5 L-3 * ? 2020-2030", "2020-01-01T00:00:00")]
#[timeout(Duration::from_secs(1))]
fn iteration_is_monotonic(#[case] expression: &str, #[case] from: &str) {
    let parsed = ParsedExpression::parse(expression).unwrap();
    let from = dt(from);

    let iterated: Vec<NaiveDateTime> = parsed.occurrences(&from).take(50).collect();
    assert_eq!(iterated.len(), 50);
    assert!(iterated[0] > from);
    assert!(iterated.windows(2).all(|pair| pair[0] < pair[1]));

    let to = dt("2100-01-01T00:00:00");
    assert_eq!(occurrences_between(expression, &from, &to, 50).unwrap(), iterated);
}

#[rstest]
#[timeout(Duration::from_secs(1))]
fn even_seconds() {
    let parsed = ParsedExpression::parse("0-59/2 * 12 * * ?").unwrap();
    let from = dt("2022-01-01T12:00:00");

    assert!(parsed.occurrences(&from).take(10).all(|next| next.and_utc().timestamp() % 2 == 0));
}

#[rstest]
#[timeout(Duration::from_secs(1))]
fn occurrences_within_range() {
    let from = dt("2024-01-01T00:00:00");
    let to = dt("2024-12-31T00:00:00");

    let last_days = occurrences_between("0 0 12 L * ?", &from, &to, DEFAULT_MAX_OCCURRENCES).unwrap();
    assert_eq!(last_days.len(), 11);
    assert_eq!(last_days[1], dt("2024-02-29T12:00:00"));
    assert!(last_days.iter().all(|next| next.month() != 12));

    let capped = occurrences_between("0 0 * * * ?", &from, &to, 24).unwrap();
    assert_eq!(capped.len(), 24);
    assert_eq!(capped.last(), Some(&dt("2024-01-02T00:00:00")));
}

#[test]
fn parse_errors_propagate() {
    let from = dt("2024-01-01T00:00:00");

    assert!(next_occurrence("", &from).is_err());
    assert!(next_occurrence("0 0 12 1 1 1", &from).is_err());
    assert!(occurrences_between("0 0 12 L/5 * ?", &from, &from, 10).is_err());
    assert!(occurrences_between("0 0 12 ? * 1#3/2", &from, &from, 10).is_err());
}

#[cfg(feature = "clock")]
#[test]
fn next_from_now() -> qcron::Result<()> {
    let before = chrono::Local::now().naive_local();
    let next = qcron::next_occurrence_from_now("0 0 0 * * ?")?;

    assert!(next.is_some_and(|next| next > before));
    Ok(())
}
