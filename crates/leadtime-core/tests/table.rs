use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, ListArray, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use leadtime_core::table::interval_batch;
use leadtime_core::{
    LeadTimeError, WeekdayRule, annotate, check_table, days_between_table,
    has_weekday_in_range_table,
};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn string_table() -> RecordBatch {
    let starts: ArrayRef = Arc::new(StringArray::from(vec![
        Some("2023-10-01"),
        Some("2023-10-01"),
        Some("2023-10-01"),
        Some("2023-10-01"),
        None,
        Some("2023-10-01"),
    ]));
    let ends: ArrayRef = Arc::new(StringArray::from(vec![
        Some("2023-10-10"),
        Some("2023-10-15"),
        Some("2023-10-12"),
        Some("2023-10-04"),
        Some("2023-10-15"),
        Some("not a date"),
    ]));
    RecordBatch::try_from_iter(vec![("start_date", starts), ("end_date", ends)]).unwrap()
}

fn list_row(list: &ListArray, i: usize) -> Vec<String> {
    let values = list.value(i);
    let names = values.as_any().downcast_ref::<StringArray>().unwrap();
    names.iter().map(|n| n.unwrap().to_string()).collect()
}

#[test]
fn thursday_scenarios_from_string_columns() {
    let batch = string_table();
    let result = has_weekday_in_range_table(&batch, "start_date", "end_date", 3, 5).unwrap();
    assert_eq!(
        result,
        BooleanArray::from(vec![false, true, false, false, false, false])
    );
}

#[test]
fn validation_precedes_column_lookup() {
    let batch = string_table();

    let err = has_weekday_in_range_table(&batch, "nope", "end_date", 7, 5).unwrap_err();
    assert!(matches!(err, LeadTimeError::InvalidWeekday { index: 7 }));

    let err = has_weekday_in_range_table(&batch, "nope", "end_date", 3, -1).unwrap_err();
    assert!(matches!(err, LeadTimeError::InvalidMinOffset { days: -1 }));
}

#[test]
fn absent_columns_are_reported_by_name() {
    let batch = string_table();
    let rule = WeekdayRule::thursday_after_five_days();

    let err = check_table(&batch, "start", "end_date", &rule).unwrap_err();
    assert!(matches!(err, LeadTimeError::ColumnNotFound(ref name) if name == "start"));

    let err = days_between_table(&batch, "start_date", "end").unwrap_err();
    assert!(matches!(err, LeadTimeError::ColumnNotFound(ref name) if name == "end"));
}

#[test]
fn day_lists_with_null_rows() {
    let batch = interval_batch(
        "start_date",
        "end_date",
        &[
            (date(2023, 10, 1), date(2023, 10, 2)),
            (None, date(2023, 10, 2)),
            (date(2023, 11, 1), date(2023, 11, 2)),
        ],
    )
    .unwrap();

    let lists = days_between_table(&batch, "start_date", "end_date").unwrap();
    assert_eq!(lists.len(), 3);
    assert_eq!(list_row(&lists, 0), vec!["Sunday", "Monday"]);
    assert!(lists.is_null(1));
    assert_eq!(list_row(&lists, 2), vec!["Wednesday", "Thursday"]);
}

#[test]
fn annotate_appends_both_columns() {
    let batch = interval_batch(
        "start_date",
        "end_date",
        &[
            (date(2023, 10, 1), date(2023, 10, 10)),
            (date(2023, 10, 1), date(2023, 10, 15)),
            (date(2023, 11, 1), date(2023, 11, 2)),
        ],
    )
    .unwrap();
    let rule = WeekdayRule::thursday_after_five_days();

    let out = annotate(
        &batch,
        "start_date",
        "end_date",
        &rule,
        "has_thursday",
        "days_list",
    )
    .unwrap();

    assert_eq!(out.num_rows(), 3);
    assert_eq!(out.num_columns(), 4);

    let schema = out.schema();
    assert_eq!(
        schema.field_with_name("has_thursday").unwrap().data_type(),
        &DataType::Boolean
    );
    assert!(matches!(
        schema.field_with_name("days_list").unwrap().data_type(),
        DataType::List(_)
    ));

    let hits = out
        .column_by_name("has_thursday")
        .unwrap()
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    assert_eq!(hits, &BooleanArray::from(vec![false, true, false]));

    let days = out
        .column_by_name("days_list")
        .unwrap()
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert_eq!(list_row(days, 0).len(), 10);
    assert_eq!(list_row(days, 2), vec!["Wednesday", "Thursday"]);
}

#[test]
fn annotate_replaces_existing_output_column() {
    let batch = interval_batch(
        "start_date",
        "end_date",
        &[(date(2023, 10, 1), date(2023, 10, 15))],
    )
    .unwrap();
    let rule = WeekdayRule::thursday_after_five_days();

    let once = annotate(&batch, "start_date", "end_date", &rule, "hit", "days").unwrap();
    let twice = annotate(&once, "start_date", "end_date", &rule, "hit", "days").unwrap();
    assert_eq!(twice.num_columns(), 4);
    assert_eq!(twice.schema(), once.schema());
}

#[test]
fn annotate_fails_without_partial_output() {
    let batch = interval_batch("start_date", "end_date", &[(date(2023, 10, 1), None)]).unwrap();
    let rule = WeekdayRule::thursday_after_five_days();
    let err = annotate(&batch, "start_date", "missing", &rule, "hit", "days").unwrap_err();
    assert!(matches!(err, LeadTimeError::ColumnNotFound(_)));
}

#[test]
fn empty_table() {
    let batch = interval_batch("start_date", "end_date", &[]).unwrap();
    let rule = WeekdayRule::thursday_after_five_days();
    let out = annotate(&batch, "start_date", "end_date", &rule, "hit", "days").unwrap();
    assert_eq!(out.num_rows(), 0);
    assert_eq!(out.num_columns(), 4);
}

#[test]
fn annotate_matches_standalone_table_functions() {
    let batch = string_table();
    let rule = WeekdayRule::thursday_after_five_days();

    let out = annotate(&batch, "start_date", "end_date", &rule, "hit", "days").unwrap();
    let hits = check_table(&batch, "start_date", "end_date", &rule).unwrap();
    let days = days_between_table(&batch, "start_date", "end_date").unwrap();

    let out_hits = out
        .column_by_name("hit")
        .unwrap()
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    let out_days = out
        .column_by_name("days")
        .unwrap()
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert_eq!(out_hits, &hits);
    assert_eq!(out_days, &days);
    assert!(out_days.is_null(4));
    assert!(out_days.is_null(5));
}
