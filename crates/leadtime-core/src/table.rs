//! Arrow adapter: read date columns by name and merge results back.

use std::sync::Arc;

use arrow::array::timezone::Tz;
use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, LargeStringArray, ListArray, ListBuilder,
    PrimitiveArray, StringArray, StringBuilder,
};
use arrow::datatypes::{
    ArrowTemporalType, ArrowTimestampType, DataType, Date32Type, Date64Type, Field, FieldRef,
    Schema, TimeUnit, TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use tracing::debug;

use crate::checker;
use crate::enumerator;
use crate::error::LeadTimeError;
use crate::parse;
use crate::rule::WeekdayRule;

/// Extract a named column as calendar dates.
///
/// Text columns are parsed with [`parse::parse_date`]; date columns keep their
/// stored calendar date. Timestamps with a timezone take the wall-clock date in
/// that zone, matching RFC 3339 text for the same instant; naive timestamps use
/// their stored date. Nulls and unparseable values become `None`.
pub fn date_column(
    batch: &RecordBatch,
    name: &str,
) -> Result<Vec<Option<NaiveDate>>, LeadTimeError> {
    let column = lookup(batch, name)?;
    column_dates(column.as_ref(), name)
}

fn lookup<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LeadTimeError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LeadTimeError::ColumnNotFound(name.to_string()))
}

fn column_dates(column: &dyn Array, name: &str) -> Result<Vec<Option<NaiveDate>>, LeadTimeError> {
    let unsupported = || LeadTimeError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: column.data_type().clone(),
    };

    let dates = match column.data_type() {
        DataType::Utf8 => column
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|strings| parse::parse_dates(strings.iter())),
        DataType::LargeUtf8 => column
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|strings| parse::parse_dates(strings.iter())),
        DataType::Date32 => temporal_dates::<Date32Type>(column),
        DataType::Date64 => temporal_dates::<Date64Type>(column),
        DataType::Timestamp(TimeUnit::Second, tz) => {
            timestamp_dates::<TimestampSecondType>(column, tz.as_deref())?
        }
        DataType::Timestamp(TimeUnit::Millisecond, tz) => {
            timestamp_dates::<TimestampMillisecondType>(column, tz.as_deref())?
        }
        DataType::Timestamp(TimeUnit::Microsecond, tz) => {
            timestamp_dates::<TimestampMicrosecondType>(column, tz.as_deref())?
        }
        DataType::Timestamp(TimeUnit::Nanosecond, tz) => {
            timestamp_dates::<TimestampNanosecondType>(column, tz.as_deref())?
        }
        DataType::Null => Some(vec![None; column.len()]),
        _ => None,
    };

    dates.ok_or_else(unsupported)
}

fn temporal_dates<T>(column: &dyn Array) -> Option<Vec<Option<NaiveDate>>>
where
    T: ArrowTemporalType,
    i64: From<T::Native>,
{
    let values = column.as_any().downcast_ref::<PrimitiveArray<T>>()?;
    Some(
        (0..values.len())
            .map(|i| {
                if values.is_null(i) {
                    None
                } else {
                    values.value_as_date(i)
                }
            })
            .collect(),
    )
}

/// Wall-clock dates in `tz`, or stored dates for naive timestamps.
fn timestamp_dates<T: ArrowTimestampType>(
    column: &dyn Array,
    tz: Option<&str>,
) -> Result<Option<Vec<Option<NaiveDate>>>, LeadTimeError> {
    let Some(tz) = tz else {
        return Ok(temporal_dates::<T>(column));
    };
    let tz: Tz = tz.parse()?;
    let Some(values) = column.as_any().downcast_ref::<PrimitiveArray<T>>() else {
        return Ok(None);
    };

    Ok(Some(
        (0..values.len())
            .map(|i| {
                if values.is_null(i) {
                    None
                } else {
                    values
                        .value_as_datetime_with_tz(i, tz)
                        .map(|dt| dt.date_naive())
                }
            })
            .collect(),
    ))
}

/// Both interval columns, looked up before either is parsed.
fn interval_columns(
    batch: &RecordBatch,
    start_col: &str,
    end_col: &str,
) -> Result<(Vec<Option<NaiveDate>>, Vec<Option<NaiveDate>>), LeadTimeError> {
    let start = lookup(batch, start_col)?;
    let end = lookup(batch, end_col)?;
    Ok((
        column_dates(start.as_ref(), start_col)?,
        column_dates(end.as_ref(), end_col)?,
    ))
}

/// Bulk weekday-in-range check over two named columns.
pub fn check_table(
    batch: &RecordBatch,
    start_col: &str,
    end_col: &str,
    rule: &WeekdayRule,
) -> Result<BooleanArray, LeadTimeError> {
    let (starts, ends) = interval_columns(batch, start_col, end_col)?;
    let hits = checker::has_weekday_in_range_bulk(&starts, &ends, rule)?;
    Ok(BooleanArray::from(hits))
}

/// [`check_table`] taking raw rule parameters.
///
/// Parameters are validated before any column is looked up, so an invalid
/// weekday is reported even when the columns are also absent.
pub fn has_weekday_in_range_table(
    batch: &RecordBatch,
    start_col: &str,
    end_col: &str,
    target_weekday: i64,
    min_offset_days: i64,
) -> Result<BooleanArray, LeadTimeError> {
    let rule = WeekdayRule::new(target_weekday, min_offset_days)?;
    check_table(batch, start_col, end_col, &rule)
}

/// Day names for every row as a nullable `List<Utf8>` column.
pub fn days_between_table(
    batch: &RecordBatch,
    start_col: &str,
    end_col: &str,
) -> Result<ListArray, LeadTimeError> {
    let (starts, ends) = interval_columns(batch, start_col, end_col)?;
    Ok(day_list_array(enumerator::days_between(&starts, &ends)?))
}

fn day_list_array(rows: Vec<Option<Vec<String>>>) -> ListArray {
    let mut builder = ListBuilder::new(StringBuilder::new());
    for row in rows {
        match row {
            Some(names) => {
                for name in names {
                    builder.values().append_value(name);
                }
                builder.append(true);
            }
            None => builder.append_null(),
        }
    }
    builder.finish()
}

/// Append the check result and day list as new columns.
///
/// Existing columns named `check_col` or `days_col` are replaced in place.
pub fn annotate(
    batch: &RecordBatch,
    start_col: &str,
    end_col: &str,
    rule: &WeekdayRule,
    check_col: &str,
    days_col: &str,
) -> Result<RecordBatch, LeadTimeError> {
    let (starts, ends) = interval_columns(batch, start_col, end_col)?;
    let hits = BooleanArray::from(checker::has_weekday_in_range_bulk(&starts, &ends, rule)?);
    let days = day_list_array(enumerator::days_between(&starts, &ends)?);

    let hits_field = Field::new(check_col, DataType::Boolean, false);
    let days_field = Field::new(days_col, days.data_type().clone(), true);

    let batch = with_column(batch, hits_field, Arc::new(hits))?;
    let batch = with_column(&batch, days_field, Arc::new(days))?;

    debug!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "annotated table"
    );
    Ok(batch)
}

fn with_column(
    batch: &RecordBatch,
    field: Field,
    column: ArrayRef,
) -> Result<RecordBatch, LeadTimeError> {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();

    match schema.index_of(field.name()) {
        Ok(i) => {
            fields[i] = Arc::new(field);
            columns[i] = column;
        }
        Err(_) => {
            fields.push(Arc::new(field));
            columns.push(column);
        }
    }

    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// Build a two-column `Date32` table from intervals.
pub fn interval_batch(
    start_col: &str,
    end_col: &str,
    intervals: &[(Option<NaiveDate>, Option<NaiveDate>)],
) -> Result<RecordBatch, LeadTimeError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(start_col, DataType::Date32, true),
        Field::new(end_col, DataType::Date32, true),
    ]));

    let starts: Date32Array = intervals
        .iter()
        .map(|(start, _)| start.map(Date32Type::from_naive_date))
        .collect();
    let ends: Date32Array = intervals
        .iter()
        .map(|(_, end)| end.map(Date32Type::from_naive_date))
        .collect();

    Ok(RecordBatch::try_new(
        schema,
        vec![Arc::new(starts), Arc::new(ends)],
    )?)
}
