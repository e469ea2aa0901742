//! Bill settings and their defaults.
//!
//! # Responsibility
//! - Hold the user-editable inputs of one billing round.
//! - Reject settings that would make allocation divide by zero.
//!
//! # Invariants
//! - A validated `BillSettings` has a finite, non-negative bill and a period
//!   of `1..=MAX_TOTAL_DAYS` days.

use crate::allocation::allocator::MAX_TOTAL_DAYS;
use crate::allocation::policy::AllocationPolicy;
use crate::model::period::BillingPeriod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Period length used when the caller does not supply one.
pub const DEFAULT_TOTAL_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidTotalBill(f64),
    InvalidTotalDays(i64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTotalBill(value) => {
                write!(f, "total_bill must be a finite amount >= 0, got {value}")
            }
            Self::InvalidTotalDays(value) => write!(
                f,
                "total_days must be between 1 and {MAX_TOTAL_DAYS}, got {value}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Inputs of one billing round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillSettings {
    pub total_bill: f64,
    pub total_days: i64,
    pub period_start: NaiveDate,
    #[serde(default)]
    pub policy: AllocationPolicy,
}

impl BillSettings {
    /// Zero bill over the default period starting at `period_start`.
    pub fn new(period_start: NaiveDate) -> Self {
        Self {
            total_bill: 0.0,
            total_days: DEFAULT_TOTAL_DAYS,
            period_start,
            policy: AllocationPolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.total_bill.is_finite() || self.total_bill < 0.0 {
            return Err(ConfigError::InvalidTotalBill(self.total_bill));
        }
        if !(1..=MAX_TOTAL_DAYS).contains(&self.total_days) {
            return Err(ConfigError::InvalidTotalDays(self.total_days));
        }
        Ok(())
    }

    pub fn period(&self) -> BillingPeriod {
        BillingPeriod::new(self.period_start, self.total_days)
    }

    /// `total_bill / total_days`, or `0.0` for an empty period.
    pub fn per_day_rate(&self) -> f64 {
        if self.total_days <= 0 {
            return 0.0;
        }
        self.total_bill / self.total_days as f64
    }
}
