//! FFI use-case API for UI hosts.
//!
//! # Responsibility
//! - Expose allocation and summary as stateless sync calls via FRB.
//! - Translate core errors into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The UI host owns all state; every call recomputes from its arguments.

use billsplit_core::{
    calculate_bill, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, AllocationPolicy, BillCalculation, BillSummary, Member,
};
use chrono::NaiveDate;
use log::warn;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling logs.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Member as sent by the UI host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillMemberInput {
    pub id: String,
    pub name: String,
    /// `yyyy-MM-dd`.
    pub start_date: String,
    pub days_in: i64,
    pub days_out: i64,
}

/// One member's owed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct BillShareItem {
    pub member_id: String,
    pub name: String,
    pub days_in: i64,
    pub days_out: i64,
    pub amount: f64,
}

/// Allocation response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct BillResponse {
    pub ok: bool,
    /// Shares in member-id order. Empty on failure.
    pub items: Vec<BillShareItem>,
    pub message: String,
}

impl BillResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Summary cards response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct BillSummaryResponse {
    pub ok: bool,
    pub per_day: f64,
    pub member_count: u32,
    pub total_calculated: f64,
    pub average_per_member: f64,
    pub difference: f64,
    /// Highest amount first.
    pub breakdown: Vec<BillShareItem>,
    pub message: String,
}

impl BillSummaryResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            per_day: 0.0,
            member_count: 0,
            total_calculated: 0.0,
            average_per_member: 0.0,
            difference: 0.0,
            breakdown: Vec::new(),
            message: message.into(),
        }
    }
}

/// Splits `total_bill` across `members` with the named policy.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - `policy`: `member_day|daily_by_absence|daily_by_presence`; empty means
///   the default (`member_day`).
/// - Never panics; `ok=false` with a message on invalid input.
#[flutter_rust_bridge::frb(sync)]
pub fn bill_calculate(
    members: Vec<BillMemberInput>,
    total_bill: f64,
    total_days: i64,
    policy: String,
) -> BillResponse {
    match run_allocation(members, total_bill, total_days, &policy) {
        Ok(calculation) => {
            let items: Vec<BillShareItem> = calculation
                .into_iter()
                .map(|(member_id, share)| BillShareItem {
                    member_id,
                    name: share.name,
                    days_in: share.days_in,
                    days_out: share.days_out,
                    amount: share.amount,
                })
                .collect();
            let message = format!("Allocated across {} member(s).", items.len());
            BillResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => BillResponse::failure(format!("bill_calculate failed: {err}")),
    }
}

/// Computes summary cards and the sorted breakdown.
///
/// # FFI contract
/// - Same inputs and error semantics as [`bill_calculate`].
#[flutter_rust_bridge::frb(sync)]
pub fn bill_summary(
    members: Vec<BillMemberInput>,
    total_bill: f64,
    total_days: i64,
    policy: String,
) -> BillSummaryResponse {
    let calculation = match run_allocation(members, total_bill, total_days, &policy) {
        Ok(calculation) => calculation,
        Err(err) => return BillSummaryResponse::failure(format!("bill_summary failed: {err}")),
    };

    let summary = BillSummary::from_calculation(total_bill, total_days, &calculation);
    let message = if summary.is_balanced() {
        "Balanced.".to_string()
    } else {
        "Allocated total differs from the bill.".to_string()
    };
    BillSummaryResponse {
        ok: true,
        per_day: summary.per_day,
        member_count: u32::try_from(summary.member_count).unwrap_or(u32::MAX),
        total_calculated: summary.total_calculated,
        average_per_member: summary.average_per_member,
        difference: summary.difference,
        breakdown: summary
            .breakdown
            .into_iter()
            .map(|line| BillShareItem {
                member_id: line.member_id,
                name: line.name,
                days_in: line.days_in,
                days_out: line.days_out,
                amount: line.amount,
            })
            .collect(),
        message,
    }
}

fn run_allocation(
    members: Vec<BillMemberInput>,
    total_bill: f64,
    total_days: i64,
    policy: &str,
) -> Result<BillCalculation, String> {
    let policy = parse_policy(policy)?;
    let members = members
        .into_iter()
        .map(to_member)
        .collect::<Result<Vec<_>, _>>()?;
    calculate_bill(&members, total_bill, total_days, policy).map_err(|err| {
        warn!(
            "event=ffi_allocation_rejected module=ffi policy={} status=error",
            policy
        );
        err.to_string()
    })
}

fn parse_policy(policy: &str) -> Result<AllocationPolicy, String> {
    if policy.trim().is_empty() {
        return Ok(AllocationPolicy::default());
    }
    policy.parse().map_err(|err| format!("{err}"))
}

fn to_member(input: BillMemberInput) -> Result<Member, String> {
    let start_date = NaiveDate::parse_from_str(input.start_date.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid start_date `{}`: {err}", input.start_date))?;
    Ok(Member::with_id(input.id, input.name, start_date, 0)
        .with_days(input.days_in, input.days_out))
}

#[cfg(test)]
mod tests {
    use super::{bill_calculate, bill_summary, core_version, init_logging, ping, BillMemberInput};

    fn input(id: &str, days_in: i64, days_out: i64) -> BillMemberInput {
        BillMemberInput {
            id: id.to_string(),
            name: id.to_uppercase(),
            start_date: "2024-12-30".to_string(),
            days_in,
            days_out,
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_dir_and_unknown_level() {
        assert!(!init_logging("info".to_string(), "tmp/logs".to_string()).is_empty());
        assert!(!init_logging("verbose".to_string(), String::new()).is_empty());
    }

    #[test]
    fn bill_calculate_defaults_to_member_day_policy() {
        let response = bill_calculate(
            vec![input("a", 30, 0), input("b", 20, 10)],
            100.0,
            30,
            String::new(),
        );

        assert!(response.ok, "{}", response.message);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].member_id, "a");
        assert!((response.items[0].amount - 60.0).abs() < 1e-9);
        assert!((response.items[1].amount - 40.0).abs() < 1e-9);
    }

    #[test]
    fn bill_calculate_reports_invalid_input() {
        let zero_days = bill_calculate(vec![input("a", 0, 0)], 100.0, 0, String::new());
        assert!(!zero_days.ok);
        assert!(zero_days.message.contains("at least one day"));

        let bad_policy = bill_calculate(vec![input("a", 1, 0)], 100.0, 1, "weekly".to_string());
        assert!(!bad_policy.ok);
        assert!(bad_policy.message.contains("weekly"));

        let mut bad_date = input("a", 1, 0);
        bad_date.start_date = "30/12/2024".to_string();
        let response = bill_calculate(vec![bad_date], 100.0, 1, String::new());
        assert!(!response.ok);
        assert!(response.message.contains("start_date"));
    }

    #[test]
    fn bill_summary_sorts_breakdown_and_reports_balance() {
        let response = bill_summary(
            vec![input("m1", 2, 0), input("m2", 1, 1)],
            10.0,
            2,
            "daily_by_absence".to_string(),
        );

        assert!(response.ok, "{}", response.message);
        assert_eq!(response.member_count, 2);
        assert_eq!(response.breakdown[0].member_id, "m1");
        assert!((response.per_day - 5.0).abs() < 1e-9);
        assert!(response.difference.abs() < 1e-9);
        assert_eq!(response.message, "Balanced.");
    }
}
