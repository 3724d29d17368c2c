//! Does a target weekday fall inside the eligible window of an interval?
//!
//! The eligible window of `[start, end]` is `[start + min_offset_days, end]`,
//! with one exception: if `end` itself is the target weekday the interval never
//! qualifies. Missing endpoints always evaluate to `false`.
//!
//! [`has_weekday_in_range`] walks the calendar day by day and is the reference
//! definition. [`has_weekday_in_range_bulk`] evaluates many intervals at once
//! in constant time per row and must agree with it on every input.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::error::LeadTimeError;
use crate::rule::WeekdayRule;

/// Evaluate one interval by enumerating its days.
pub fn has_weekday_in_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    rule: &WeekdayRule,
) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return false;
    };

    if end.weekday() == rule.target() {
        return false;
    }

    let min_offset = i64::from(rule.min_offset_days());
    if (end - start).num_days() < min_offset {
        return false;
    }

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .any(|d| d.weekday() == rule.target() && (d - start).num_days() >= min_offset)
}

/// Evaluate aligned `starts`/`ends` row by row without walking any calendar.
///
/// The first occurrence of the target weekday on or after
/// `start + min_offset_days` is found with modular arithmetic; the row
/// qualifies when that day is no later than `end`.
///
/// # Errors
///
/// Returns [`LeadTimeError::LengthMismatch`] if the slices differ in length.
/// No rows are evaluated in that case.
pub fn has_weekday_in_range_bulk(
    starts: &[Option<NaiveDate>],
    ends: &[Option<NaiveDate>],
    rule: &WeekdayRule,
) -> Result<Vec<bool>, LeadTimeError> {
    if starts.len() != ends.len() {
        return Err(LeadTimeError::LengthMismatch {
            starts: starts.len(),
            ends: ends.len(),
        });
    }

    let result: Vec<bool> = starts
        .iter()
        .zip(ends)
        .map(|(start, end)| evaluate_closed_form(*start, *end, rule).unwrap_or(false))
        .collect();

    debug!(
        rows = result.len(),
        hits = result.iter().filter(|hit| **hit).count(),
        target = rule.target_index(),
        min_offset_days = rule.min_offset_days(),
        "evaluated weekday-in-range in bulk"
    );

    Ok(result)
}

/// `None` when any intermediate is undefined (missing endpoint, date overflow).
fn evaluate_closed_form(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    rule: &WeekdayRule,
) -> Option<bool> {
    let start = start?;
    let end = end?;

    let not_end_target = end.weekday() != rule.target();
    let diff_ok = (end - start).num_days() >= i64::from(rule.min_offset_days());

    let earliest_eligible = start.checked_add_days(Days::new(rule.min_offset_days().into()))?;
    let days_to_target =
        (rule.target_index() + 7 - earliest_eligible.weekday().num_days_from_monday()) % 7;
    let first_target_day = earliest_eligible.checked_add_days(Days::new(days_to_target.into()))?;
    let has_target = first_target_day <= end;

    Some(not_end_target && diff_ok && has_target)
}

/// Thursday at least 5 days after `start`, for a single interval.
pub fn has_thursday_after_5_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    has_weekday_in_range(start, end, &WeekdayRule::thursday_after_five_days())
}

/// Bulk form of [`has_thursday_after_5_days`].
pub fn has_thursday_after_5_days_bulk(
    starts: &[Option<NaiveDate>],
    ends: &[Option<NaiveDate>],
) -> Result<Vec<bool>, LeadTimeError> {
    has_weekday_in_range_bulk(starts, ends, &WeekdayRule::thursday_after_five_days())
}
