//! Allocation entry points and policy implementations.
//!
//! # Responsibility
//! - Validate allocation input once, at the boundary.
//! - Dispatch to the selected [`AllocationPolicy`].
//!
//! # Invariants
//! - Every member of a non-empty, valid roster appears in the result, except
//!   under `MemberDay` when there are no member-days at all (empty result).
//! - A member with `days_in == 0` owes nothing under every policy.
//! - `MemberDay` conserves the total bill; the daily policies drop the share
//!   of any day nobody attended.

use crate::allocation::error::{AllocationError, AllocationResult};
use crate::allocation::policy::AllocationPolicy;
use crate::model::calculation::{total_amount, BillCalculation, MemberShare};
use crate::model::member::Member;
use log::{debug, warn};
use std::collections::HashSet;

/// Longest period the daily policies will walk day by day.
pub const MAX_TOTAL_DAYS: i64 = 3_660;

/// Splits `total_bill` over `members` for a period of `total_days` days.
///
/// # Errors
/// - [`AllocationError::InvalidPeriod`] when `total_days < 1`.
/// - [`AllocationError::PeriodTooLong`] when a daily policy is asked for
///   more than [`MAX_TOTAL_DAYS`] days. `MemberDay` has no upper bound.
/// - [`AllocationError::InvalidBill`] when `total_bill` is negative or not
///   finite.
/// - [`AllocationError::InvalidMember`] / [`AllocationError::DuplicateMember`]
///   for bad roster entries.
///
/// An empty roster short-circuits to an empty calculation before any check.
pub fn calculate_bill(
    members: &[Member],
    total_bill: f64,
    total_days: i64,
    policy: AllocationPolicy,
) -> AllocationResult<BillCalculation> {
    if members.is_empty() {
        debug!(
            "event=bill_calculated module=allocation policy={} members=0 status=empty",
            policy
        );
        return Ok(BillCalculation::new());
    }

    validate_period(total_days, policy)?;
    validate_bill(total_bill)?;
    validate_members(members)?;
    warn_on_counter_drift(members, total_days);

    let calculation = match policy {
        AllocationPolicy::MemberDay => allocate_by_member_day(members, total_bill),
        AllocationPolicy::DailyByAbsence => {
            allocate_daily_by_absence(members, total_bill, total_days)
        }
        AllocationPolicy::DailyByPresence => {
            allocate_daily_by_presence(members, total_bill, total_days)
        }
    };

    debug!(
        "event=bill_calculated module=allocation policy={} members={} days={} allocated={:.4} status=ok",
        policy,
        calculation.len(),
        total_days,
        total_amount(&calculation)
    );
    Ok(calculation)
}

/// Cost of one member-day: `total_bill / Σ days_in`.
///
/// # Errors
/// - [`AllocationError::DegenerateInput`] when nobody was present on any day
///   (including an empty roster).
/// - Bill and member validation errors as in [`calculate_bill`].
pub fn member_day_rate(members: &[Member], total_bill: f64) -> AllocationResult<f64> {
    validate_bill(total_bill)?;
    validate_members(members)?;

    let member_days = total_member_days(members);
    if member_days == 0 {
        return Err(AllocationError::DegenerateInput);
    }
    Ok(total_bill / member_days as f64)
}

fn validate_period(total_days: i64, policy: AllocationPolicy) -> AllocationResult<()> {
    if total_days < 1 {
        return Err(AllocationError::InvalidPeriod { total_days });
    }
    if policy != AllocationPolicy::MemberDay && total_days > MAX_TOTAL_DAYS {
        return Err(AllocationError::PeriodTooLong {
            total_days,
            max: MAX_TOTAL_DAYS,
        });
    }
    Ok(())
}

fn validate_bill(total_bill: f64) -> AllocationResult<()> {
    if !total_bill.is_finite() || total_bill < 0.0 {
        return Err(AllocationError::InvalidBill(total_bill));
    }
    Ok(())
}

fn validate_members(members: &[Member]) -> AllocationResult<()> {
    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        member
            .validate()
            .map_err(|source| AllocationError::InvalidMember {
                member_id: member.id.clone(),
                source,
            })?;
        if !seen.insert(member.id.as_str()) {
            return Err(AllocationError::DuplicateMember(member.id.clone()));
        }
    }
    Ok(())
}

fn warn_on_counter_drift(members: &[Member], total_days: i64) {
    let drifted = members
        .iter()
        .filter(|member| !member.counts_match_period(total_days))
        .count();
    if drifted > 0 {
        warn!(
            "event=counter_drift module=allocation members={} days={} status=accepted",
            drifted, total_days
        );
    }
}

// Widened so that huge counters cannot saturate and break conservation.
fn total_member_days(members: &[Member]) -> i128 {
    members.iter().map(|member| i128::from(member.days_in)).sum()
}

fn allocate_by_member_day(members: &[Member], total_bill: f64) -> BillCalculation {
    let member_days = total_member_days(members);
    if member_days == 0 {
        return BillCalculation::new();
    }

    let cost_per_member_day = total_bill / member_days as f64;
    members
        .iter()
        .map(|member| {
            let amount = member.days_in as f64 * cost_per_member_day;
            (member.id.clone(), MemberShare::for_member(member, amount))
        })
        .collect()
}

// Day numbers are 1-based here.
fn present_by_absence(member: &Member, day: i64) -> bool {
    member.days_in > 0 && member.days_out < day
}

fn allocate_daily_by_absence(
    members: &[Member],
    total_bill: f64,
    total_days: i64,
) -> BillCalculation {
    let daily_rate = total_bill / total_days as f64;
    let mut amounts = vec![0.0_f64; members.len()];
    let mut present = Vec::with_capacity(members.len());

    for day in 1..=total_days {
        present.clear();
        present.extend(
            members
                .iter()
                .enumerate()
                .filter(|(_, member)| present_by_absence(member, day))
                .map(|(idx, _)| idx),
        );
        if present.is_empty() {
            continue;
        }

        let share = daily_rate / present.len() as f64;
        for &idx in &present {
            amounts[idx] += share;
        }
    }

    members
        .iter()
        .zip(amounts)
        .map(|(member, amount)| (member.id.clone(), MemberShare::for_member(member, amount)))
        .collect()
}

fn allocate_daily_by_presence(
    members: &[Member],
    total_bill: f64,
    total_days: i64,
) -> BillCalculation {
    let per_day_rate = total_bill / total_days as f64;
    let members_by_day: Vec<usize> = (0..total_days)
        .map(|day| members.iter().filter(|member| member.days_in > day).count())
        .collect();

    members
        .iter()
        .map(|member| {
            let present_days = usize::try_from(member.days_in.min(total_days)).unwrap_or(0);
            let amount: f64 = members_by_day[..present_days]
                .iter()
                .filter(|&&count| count > 0)
                .map(|&count| per_day_rate / count as f64)
                .sum();
            (member.id.clone(), MemberShare::for_member(member, amount))
        })
        .collect()
}
