//! Engine configuration: credit terms, financing rate, and reminder schedules

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parameters for a credit policy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Baseline credit term granted to every customer, in days
    #[serde(default = "default_credit_term_days")]
    pub credit_term_days: u32,

    /// Weighted average cost of capital as a fraction (0.10 = 10%)
    #[serde(default = "default_wacc")]
    pub wacc: f64,

    /// Day-count convention used to convert the annual rate to a daily rate
    #[serde(default = "default_days_in_year")]
    pub days_in_year: u32,

    /// Fraction of customers, by total invoice volume, flagged high-value
    /// (0.25 = top quarter)
    #[serde(default = "default_top_value_fraction")]
    pub top_value_fraction: f64,

    /// Reminder cadence attached to high-risk customers
    #[serde(default = "default_intense_schedule")]
    pub intense_schedule_label: String,

    /// Reminder cadence attached to everyone else
    #[serde(default = "default_normal_schedule")]
    pub normal_schedule_label: String,
}

fn default_credit_term_days() -> u32 { 30 }
fn default_wacc() -> f64 { 0.10 }
fn default_days_in_year() -> u32 { 360 }
fn default_top_value_fraction() -> f64 { 0.25 }
fn default_intense_schedule() -> String {
    "Intense: Reminders in -7, -1, +1, and then every 7 Days from Due Date".to_string()
}
fn default_normal_schedule() -> String {
    "Normal: Reminders in -1, and then every 15 Days from Due Date".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            credit_term_days: default_credit_term_days(),
            wacc: default_wacc(),
            days_in_year: default_days_in_year(),
            top_value_fraction: default_top_value_fraction(),
            intense_schedule_label: default_intense_schedule(),
            normal_schedule_label: default_normal_schedule(),
        }
    }
}

impl PolicyConfig {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&self.wacc) {
            return Err(EngineError::Validation(format!(
                "wacc must be a fraction in [0, 1], got {}",
                self.wacc
            )));
        }
        if self.days_in_year == 0 {
            return Err(EngineError::Validation(
                "days_in_year must be positive".to_string(),
            ));
        }
        if !(self.top_value_fraction > 0.0 && self.top_value_fraction <= 1.0) {
            return Err(EngineError::Validation(format!(
                "top_value_fraction must be in (0, 1], got {}",
                self.top_value_fraction
            )));
        }
        Ok(())
    }
}
