//! Core domain logic for attendance-weighted bill sharing.
//! This crate is the single source of truth for allocation invariants.

pub mod allocation;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;

pub use allocation::{
    calculate_bill, member_day_rate, AllocationError, AllocationPolicy, AllocationResult,
    UnknownPolicyError, MAX_TOTAL_DAYS,
};
pub use config::{BillSettings, ConfigError, DEFAULT_TOTAL_DAYS};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendance::AbsenceLedger;
pub use model::calculation::{total_amount, BillCalculation, MemberShare};
pub use model::member::{Member, MemberId, MemberValidationError};
pub use model::period::BillingPeriod;
pub use service::session::{BillingSession, SessionError, SessionResult};
pub use service::summary::{BillSummary, BreakdownLine};

/// Minimal health-check API for host integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
