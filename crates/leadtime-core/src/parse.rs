use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Coerce a date-like string to a calendar date.
///
/// Unparseable input yields `None` rather than an error. Times of day are
/// dropped; RFC 3339 values keep the date of their own offset.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// [`parse_date`] over optional strings, as found in nullable text columns.
pub fn parse_dates<'a>(
    values: impl IntoIterator<Item = Option<&'a str>>,
) -> Vec<Option<NaiveDate>> {
    values
        .into_iter()
        .map(|value| value.and_then(parse_date))
        .collect()
}
