//! Member domain model.
//!
//! # Responsibility
//! - Define the bill-sharing participant record consumed by the allocator.
//! - Validate day counters before they reach any division.
//!
//! # Invariants
//! - `id` is non-empty and unique within one roster.
//! - `days_in` and `days_out` are never negative for a valid member.
//! - `days_in + days_out` is expected to equal the billing period length,
//!   but this is not enforced here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a roster member.
///
/// Kept as a string alias: callers may bring their own ids (imports, UI
/// keys), while generated ids are UUID v4 strings.
pub type MemberId = String;

/// Validation errors for member invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyId,
    NegativeDaysIn(i64),
    NegativeDaysOut(i64),
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "member id cannot be empty"),
            Self::NegativeDaysIn(value) => write!(f, "days_in ({value}) must be >= 0"),
            Self::NegativeDaysOut(value) => write!(f, "days_out ({value}) must be >= 0"),
        }
    }
}

impl Error for MemberValidationError {}

/// One participant in a shared bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Display name. Never written to logs.
    pub name: String,
    /// Date the member joined the household.
    pub start_date: NaiveDate,
    /// Days absent during the billing period.
    pub days_out: i64,
    /// Days present during the billing period.
    pub days_in: i64,
}

impl Member {
    /// Creates a member with a generated id and a fully-present period.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, total_days: i64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, start_date, total_days)
    }

    /// Creates a member with a caller-provided id and a fully-present period.
    ///
    /// Does not validate; call [`Member::validate`] before allocation.
    pub fn with_id(
        id: impl Into<MemberId>,
        name: impl Into<String>,
        start_date: NaiveDate,
        total_days: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date,
            days_out: 0,
            days_in: total_days,
        }
    }

    /// Builder-style override of both day counters.
    pub fn with_days(mut self, days_in: i64, days_out: i64) -> Self {
        self.days_in = days_in;
        self.days_out = days_out;
        self
    }

    /// Validates counters and identity.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.id.trim().is_empty() {
            return Err(MemberValidationError::EmptyId);
        }
        if self.days_in < 0 {
            return Err(MemberValidationError::NegativeDaysIn(self.days_in));
        }
        if self.days_out < 0 {
            return Err(MemberValidationError::NegativeDaysOut(self.days_out));
        }
        Ok(())
    }

    /// Returns whether the counters add up to `total_days`.
    pub fn counts_match_period(&self, total_days: i64) -> bool {
        self.days_in.checked_add(self.days_out) == Some(total_days)
    }
}
