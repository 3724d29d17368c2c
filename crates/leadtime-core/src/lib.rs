//! Weekday checks and day-name enumeration over lead-time intervals.
//!
//! - [`checker`]: does a target weekday fall in `[start + min_offset_days, end]`?
//! - [`enumerator`]: weekday names for every day of an interval
//! - [`table`]: the same operations over named columns of an Arrow table
//! - [`dataset`]: Parquet input and output
//! - [`config`]: JSON rule configuration

pub mod checker;
pub mod config;
pub mod dataset;
pub mod enumerator;
pub mod error;
pub mod parse;
pub mod rule;
pub mod table;

pub use checker::{
    has_thursday_after_5_days, has_thursday_after_5_days_bulk, has_weekday_in_range,
    has_weekday_in_range_bulk,
};
pub use config::RuleConfig;
pub use enumerator::{day_names, days_between};
pub use error::LeadTimeError;
pub use rule::WeekdayRule;
pub use table::{annotate, check_table, days_between_table, has_weekday_in_range_table};
