use std::path::Path;

use serde::Deserialize;

use crate::error::LeadTimeError;
use crate::rule::WeekdayRule;

/// Rule parameters as written in a JSON config file.
///
/// Omitted fields fall back to the Thursday / 5 day preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Monday=0 .. Sunday=6.
    pub target_weekday: i64,
    pub min_offset_days: i64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        let preset = WeekdayRule::thursday_after_five_days();
        Self {
            target_weekday: preset.target_index().into(),
            min_offset_days: preset.min_offset_days().into(),
        }
    }
}

impl RuleConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LeadTimeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LeadTimeError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn into_rule(self) -> Result<WeekdayRule, LeadTimeError> {
        WeekdayRule::new(self.target_weekday, self.min_offset_days)
    }
}
