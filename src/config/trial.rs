//! Trial configuration

use serde::Deserialize;

use crate::domain::trial::MAX_TRIAL_DAYS;

use super::error::ValidationError;

/// Trial lifecycle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrialConfig {
    /// Length of the free trial window in calendar days
    #[serde(default = "default_total_days")]
    pub total_days: i32,
}

impl TrialConfig {
    /// Validate trial configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_TRIAL_DAYS).contains(&self.total_days) {
            return Err(ValidationError::TrialLengthOutOfRange);
        }
        Ok(())
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            total_days: default_total_days(),
        }
    }
}

fn default_total_days() -> i32 {
    7
}
