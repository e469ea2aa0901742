//! Billing period window.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Half-open run of `total_days` calendar days starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub total_days: i64,
}

impl BillingPeriod {
    pub fn new(start: NaiveDate, total_days: i64) -> Self {
        Self { start, total_days }
    }

    /// First date after the period, or `None` for an empty/overflowing window.
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        let days = u64::try_from(self.total_days).ok()?;
        self.start.checked_add_days(Days::new(days))
    }

    /// Returns whether `date` falls inside the period.
    ///
    /// A non-positive `total_days` contains no dates.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.total_days <= 0 || date < self.start {
            return false;
        }
        match self.end_exclusive() {
            Some(end) => date < end,
            None => false,
        }
    }

    /// Iterates every date of the period in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let count = usize::try_from(self.total_days).unwrap_or(0);
        self.start.iter_days().take(count)
    }
}
