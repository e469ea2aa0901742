//! Aggregate view over a bill calculation.
//!
//! # Responsibility
//! - Derive the summary cards (total, per day, member count, average,
//!   difference) from a calculation.
//! - Order the per-member breakdown for display.

use crate::model::calculation::{total_amount, BillCalculation};
use crate::model::member::MemberId;
use serde::Serialize;
use std::cmp::Ordering;

/// Differences below half a cent count as balanced.
pub const BALANCE_TOLERANCE: f64 = 0.005;

/// One line of the breakdown list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub member_id: MemberId,
    pub name: String,
    pub days_in: i64,
    pub days_out: i64,
    pub amount: f64,
    /// `days_in / (days_in + days_out)`, `0.0` when both are zero.
    pub presence_ratio: f64,
}

/// Summary cards plus breakdown for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillSummary {
    pub total_bill: f64,
    pub total_days: i64,
    pub per_day: f64,
    pub member_count: usize,
    pub total_calculated: f64,
    pub average_per_member: f64,
    /// `total_bill - total_calculated`.
    pub difference: f64,
    /// Sorted by amount, highest first; ties broken by member id.
    pub breakdown: Vec<BreakdownLine>,
}

impl BillSummary {
    pub fn from_calculation(
        total_bill: f64,
        total_days: i64,
        calculation: &BillCalculation,
    ) -> Self {
        let member_count = calculation.len();
        let total_calculated = total_amount(calculation);
        let average_per_member = if member_count > 0 {
            total_calculated / member_count as f64
        } else {
            0.0
        };
        let per_day = if total_days > 0 {
            total_bill / total_days as f64
        } else {
            0.0
        };

        let mut breakdown: Vec<BreakdownLine> = calculation
            .iter()
            .map(|(member_id, share)| BreakdownLine {
                member_id: member_id.clone(),
                name: share.name.clone(),
                days_in: share.days_in,
                days_out: share.days_out,
                amount: share.amount,
                presence_ratio: presence_ratio(share.days_in, share.days_out),
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.member_id.cmp(&b.member_id))
        });

        Self {
            total_bill,
            total_days,
            per_day,
            member_count,
            total_calculated,
            average_per_member,
            difference: total_bill - total_calculated,
            breakdown,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.difference.abs() < BALANCE_TOLERANCE
    }
}

fn presence_ratio(days_in: i64, days_out: i64) -> f64 {
    let total = days_in.saturating_add(days_out);
    if total <= 0 {
        return 0.0;
    }
    days_in as f64 / total as f64
}
