//! Processing options shared by the folder processor and the consolidator.

use serde::{Deserialize, Serialize};

/// Year assumed for dates exported without one (`Dec 10`, `Jan 21`).
///
/// Exports that omit the year cover a single December/January boundary:
/// December belongs to `december_year`, every other month to the year after.
/// Data spanning more than one such boundary will be mis-dated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearInference {
    pub december_year: i32,
}

impl YearInference {
    pub const fn new(december_year: i32) -> Self {
        Self { december_year }
    }

    /// Year for a 1-based month number.
    pub const fn year_for_month(&self, month: u32) -> i32 {
        if month == 12 {
            self.december_year
        } else {
            self.december_year + 1
        }
    }
}

impl Default for YearInference {
    fn default() -> Self {
        Self::new(2025)
    }
}

/// Constants read once from configuration and passed into processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Inclusive lower bound on output dates, as `YYYYMMDD`.
    pub from_date: i64,
    /// Calories added to each daily exercise total.
    pub basal_burn: f64,
    #[serde(default)]
    pub year_inference: YearInference,
}

impl ProcessingOptions {
    pub fn new(from_date: i64, basal_burn: f64) -> Self {
        Self {
            from_date,
            basal_burn,
            year_inference: YearInference::default(),
        }
    }

    #[must_use]
    pub fn with_year_inference(mut self, year_inference: YearInference) -> Self {
        self.year_inference = year_inference;
        self
    }
}
