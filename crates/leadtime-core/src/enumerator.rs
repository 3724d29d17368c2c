use chrono::NaiveDate;
use tracing::debug;

use crate::error::LeadTimeError;

/// Full English weekday names for every day in `[start, end]`.
///
/// Returns `None` if either endpoint is missing and an empty list when
/// `end` precedes `start`.
pub fn day_names(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Vec<String>> {
    let (start, end) = (start?, end?);
    Some(
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| d.format("%A").to_string())
            .collect(),
    )
}

/// Row-wise [`day_names`] over aligned `starts`/`ends`.
pub fn days_between(
    starts: &[Option<NaiveDate>],
    ends: &[Option<NaiveDate>],
) -> Result<Vec<Option<Vec<String>>>, LeadTimeError> {
    if starts.len() != ends.len() {
        return Err(LeadTimeError::LengthMismatch {
            starts: starts.len(),
            ends: ends.len(),
        });
    }

    let out: Vec<Option<Vec<String>>> = starts
        .iter()
        .zip(ends)
        .map(|(start, end)| day_names(*start, *end))
        .collect();

    debug!(
        rows = out.len(),
        skipped = out.iter().filter(|names| names.is_none()).count(),
        "enumerated day names"
    );

    Ok(out)
}
