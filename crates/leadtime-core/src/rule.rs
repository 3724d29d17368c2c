use chrono::Weekday;

use crate::error::LeadTimeError;

/// A target weekday that must fall at least `min_offset_days` after the start
/// of an interval and no later than its end.
///
/// Weekdays are indexed Monday=0 through Sunday=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayRule {
    target: Weekday,
    min_offset_days: u32,
}

impl WeekdayRule {
    /// Validate raw caller input and build a rule.
    pub fn new(target_weekday: i64, min_offset_days: i64) -> Result<Self, LeadTimeError> {
        let target = u8::try_from(target_weekday)
            .ok()
            .and_then(|i| Weekday::try_from(i).ok())
            .ok_or(LeadTimeError::InvalidWeekday {
                index: target_weekday,
            })?;
        let min_offset_days =
            u32::try_from(min_offset_days).map_err(|_| LeadTimeError::InvalidMinOffset {
                days: min_offset_days,
            })?;
        Ok(Self {
            target,
            min_offset_days,
        })
    }

    pub fn from_weekday(target: Weekday, min_offset_days: u32) -> Self {
        Self {
            target,
            min_offset_days,
        }
    }

    /// A Thursday at least 5 days after the start.
    pub fn thursday_after_five_days() -> Self {
        Self::from_weekday(Weekday::Thu, 5)
    }

    pub fn target(&self) -> Weekday {
        self.target
    }

    /// Monday=0 .. Sunday=6.
    pub fn target_index(&self) -> u32 {
        self.target.num_days_from_monday()
    }

    pub fn min_offset_days(&self) -> u32 {
        self.min_offset_days
    }
}

impl Default for WeekdayRule {
    fn default() -> Self {
        Self::thursday_after_five_days()
    }
}
