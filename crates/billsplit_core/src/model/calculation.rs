//! Derived per-member allocation result.

use crate::model::member::{Member, MemberId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One member's line in a [`BillCalculation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberShare {
    pub name: String,
    pub days_in: i64,
    pub days_out: i64,
    /// Owed amount in bill currency units.
    pub amount: f64,
}

impl MemberShare {
    pub(crate) fn for_member(member: &Member, amount: f64) -> Self {
        Self {
            name: member.name.clone(),
            days_in: member.days_in,
            days_out: member.days_out,
            amount,
        }
    }
}

/// Member id -> owed share. Ordered by id so output is deterministic.
pub type BillCalculation = BTreeMap<MemberId, MemberShare>;

/// Sums every share amount in a calculation.
pub fn total_amount(calculation: &BillCalculation) -> f64 {
    calculation.values().map(|share| share.amount).sum()
}
