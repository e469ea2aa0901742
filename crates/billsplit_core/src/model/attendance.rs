//! Date-indexed absence ledger.
//!
//! # Responsibility
//! - Record which members are absent on which calendar date.
//! - Answer per-date and per-member absence queries for the calendar view
//!   and for day-counter derivation.
//!
//! # Invariants
//! - A member appears at most once per date.
//! - Dates with no absent member are not stored.
//! - Ledger updates are applied in place; no counter is kept alongside.

use crate::model::member::MemberId;
use crate::model::period::BillingPeriod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Absent member ids keyed by date.
///
/// Serializes as `{ "yyyy-MM-dd": ["member-id", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbsenceLedger {
    by_date: BTreeMap<NaiveDate, BTreeSet<MemberId>>,
}

impl AbsenceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `member_id` absent (`absent = true`) or present on `date`.
    ///
    /// Returns `true` when the ledger changed.
    pub fn set_absence(&mut self, member_id: &str, date: NaiveDate, absent: bool) -> bool {
        if absent {
            return self
                .by_date
                .entry(date)
                .or_default()
                .insert(member_id.to_string());
        }

        let Some(bucket) = self.by_date.get_mut(&date) else {
            return false;
        };
        let changed = bucket.remove(member_id);
        if bucket.is_empty() {
            self.by_date.remove(&date);
        }
        changed
    }

    /// Applies the same absence flag to several members on one date.
    ///
    /// Returns how many entries changed.
    pub fn set_absences<'a, I>(&mut self, member_ids: I, date: NaiveDate, absent: bool) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        member_ids
            .into_iter()
            .filter(|member_id| self.set_absence(member_id, date, absent))
            .count()
    }

    pub fn is_absent(&self, member_id: &str, date: NaiveDate) -> bool {
        self.by_date
            .get(&date)
            .is_some_and(|bucket| bucket.contains(member_id))
    }

    /// Members absent on `date`, in id order.
    pub fn absent_on(&self, date: NaiveDate) -> Vec<&str> {
        self.by_date
            .get(&date)
            .map(|bucket| bucket.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Count badge for a calendar cell.
    pub fn absent_count_on(&self, date: NaiveDate) -> usize {
        self.by_date.get(&date).map_or(0, BTreeSet::len)
    }

    /// Counts the member's absences that fall inside `period`.
    pub fn absences_in(&self, member_id: &str, period: &BillingPeriod) -> i64 {
        let count = self
            .by_date
            .iter()
            .filter(|(date, bucket)| period.contains(**date) && bucket.contains(member_id))
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    /// Drops every absence recorded for `member_id`.
    pub fn forget_member(&mut self, member_id: &str) {
        self.by_date.retain(|_, bucket| {
            bucket.remove(member_id);
            !bucket.is_empty()
        });
    }

    /// Dates that have at least one absence, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::AbsenceLedger;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).expect("valid date")
    }

    #[test]
    fn marking_absent_twice_is_idempotent() {
        let mut ledger = AbsenceLedger::new();
        assert!(ledger.set_absence("1", date(3), true));
        assert!(!ledger.set_absence("1", date(3), true));
        assert_eq!(ledger.absent_count_on(date(3)), 1);
    }

    #[test]
    fn clearing_last_absence_drops_the_date() {
        let mut ledger = AbsenceLedger::new();
        ledger.set_absence("1", date(3), true);
        assert!(ledger.set_absence("1", date(3), false));
        assert!(!ledger.set_absence("1", date(3), false));
        assert!(ledger.is_empty());
    }

    #[test]
    fn forget_member_prunes_every_date() {
        let mut ledger = AbsenceLedger::new();
        ledger.set_absences(["1", "2"], date(4), true);
        ledger.set_absence("1", date(5), true);

        ledger.forget_member("1");

        assert_eq!(ledger.absent_on(date(4)), vec!["2"]);
        assert_eq!(ledger.absent_count_on(date(5)), 0);
        assert_eq!(ledger.dates().collect::<Vec<_>>(), vec![date(4)]);
    }
}
