//! In-memory billing session.
//!
//! # Responsibility
//! - Own the roster, the absence ledger, and the bill settings of one round.
//! - Derive member day counters from the ledger and feed the allocator.
//!
//! # Invariants
//! - The absence ledger is the only attendance record. Stored members carry
//!   no authoritative counters; [`BillingSession::members`] recomputes
//!   `days_out` as absences inside the period and `days_in` as the rest.
//! - Absences can only be recorded for roster members on period dates.
//! - Removing a member also removes their absences.

use crate::allocation::{calculate_bill, AllocationError, AllocationPolicy};
use crate::config::{BillSettings, ConfigError};
use crate::model::attendance::AbsenceLedger;
use crate::model::calculation::BillCalculation;
use crate::model::member::{Member, MemberId};
use crate::service::summary::BillSummary;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    UnknownMember(MemberId),
    DuplicateMember(MemberId),
    EmptyName,
    DateOutsidePeriod(NaiveDate),
    InvalidSettings(ConfigError),
    Allocation(AllocationError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMember(id) => write!(f, "member not found: {id}"),
            Self::DuplicateMember(id) => write!(f, "member already exists: {id}"),
            Self::EmptyName => write!(f, "member name cannot be empty"),
            Self::DateOutsidePeriod(date) => {
                write!(f, "date {date} is outside the billing period")
            }
            Self::InvalidSettings(err) => write!(f, "{err}"),
            Self::Allocation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSettings(err) => Some(err),
            Self::Allocation(err) => Some(err),
            Self::UnknownMember(_)
            | Self::DuplicateMember(_)
            | Self::EmptyName
            | Self::DateOutsidePeriod(_) => None,
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidSettings(value)
    }
}

impl From<AllocationError> for SessionError {
    fn from(value: AllocationError) -> Self {
        Self::Allocation(value)
    }
}

/// Mutable state of one billing round.
#[derive(Debug, Clone)]
pub struct BillingSession {
    settings: BillSettings,
    roster: Vec<Member>,
    absences: AbsenceLedger,
}

impl BillingSession {
    /// Starts an empty session.
    ///
    /// # Errors
    /// - Returns `InvalidSettings` when `settings` fail validation.
    pub fn new(settings: BillSettings) -> SessionResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            roster: Vec::new(),
            absences: AbsenceLedger::new(),
        })
    }

    pub fn settings(&self) -> &BillSettings {
        &self.settings
    }

    pub fn absences(&self) -> &AbsenceLedger {
        &self.absences
    }

    /// Adds a member with a generated id, starting on the period start.
    pub fn add_member(&mut self, name: &str) -> SessionResult<MemberId> {
        let name = normalize_name(name)?;
        let member = Member::new(name, self.settings.period_start, self.settings.total_days);
        let member_id = member.id.clone();
        self.roster.push(member);
        info!(
            "event=member_added module=session member_id={} members={}",
            member_id,
            self.roster.len()
        );
        Ok(member_id)
    }

    /// Adds a caller-identified member. Stored day counters are ignored.
    ///
    /// # Errors
    /// - `DuplicateMember` when the id is already on the roster.
    /// - `EmptyName` when the trimmed name is empty.
    /// - `Allocation(InvalidMember)` when the id is blank.
    pub fn insert_member(&mut self, member: Member) -> SessionResult<()> {
        member
            .validate()
            .map_err(|source| AllocationError::InvalidMember {
                member_id: member.id.clone(),
                source,
            })?;
        if self.position(&member.id).is_some() {
            return Err(SessionError::DuplicateMember(member.id));
        }
        let name = normalize_name(&member.name)?;
        let member_id = member.id.clone();
        self.roster.push(Member {
            name,
            days_in: self.settings.total_days,
            days_out: 0,
            ..member
        });
        info!(
            "event=member_added module=session member_id={} members={}",
            member_id,
            self.roster.len()
        );
        Ok(())
    }

    /// Removes a member and every absence recorded for them.
    pub fn remove_member(&mut self, member_id: &str) -> SessionResult<Member> {
        let index = self.require_member(member_id)?;
        let removed = self.roster.remove(index);
        self.absences.forget_member(member_id);
        info!(
            "event=member_removed module=session member_id={} members={}",
            member_id,
            self.roster.len()
        );
        Ok(removed)
    }

    pub fn rename_member(&mut self, member_id: &str, name: &str) -> SessionResult<()> {
        let index = self.require_member(member_id)?;
        self.roster[index].name = normalize_name(name)?;
        Ok(())
    }

    pub fn set_total_bill(&mut self, total_bill: f64) -> SessionResult<()> {
        self.update_settings(|settings| settings.total_bill = total_bill)
    }

    pub fn set_total_days(&mut self, total_days: i64) -> SessionResult<()> {
        self.update_settings(|settings| settings.total_days = total_days)
    }

    /// Moves the period window. Absences outside the new window are kept
    /// in the ledger but no longer counted.
    pub fn set_period_start(&mut self, period_start: NaiveDate) -> SessionResult<()> {
        self.update_settings(|settings| settings.period_start = period_start)
    }

    pub fn set_policy(&mut self, policy: AllocationPolicy) {
        self.settings.policy = policy;
    }

    /// Marks one member absent or present on `date`.
    ///
    /// Returns `true` when attendance changed.
    pub fn set_absence(
        &mut self,
        member_id: &str,
        date: NaiveDate,
        absent: bool,
    ) -> SessionResult<bool> {
        self.require_member(member_id)?;
        self.require_period_date(date)?;
        Ok(self.absences.set_absence(member_id, date, absent))
    }

    /// Applies one absence flag to several members on `date`.
    ///
    /// All ids are checked before the ledger is touched, so an unknown id
    /// leaves attendance unchanged. Returns how many entries changed.
    pub fn set_absences(
        &mut self,
        member_ids: &[&str],
        date: NaiveDate,
        absent: bool,
    ) -> SessionResult<usize> {
        self.require_period_date(date)?;
        for member_id in member_ids {
            self.require_member(member_id)?;
        }
        Ok(self
            .absences
            .set_absences(member_ids.iter().copied(), date, absent))
    }

    /// Roster with day counters derived from the ledger.
    pub fn members(&self) -> Vec<Member> {
        let period = self.settings.period();
        self.roster
            .iter()
            .map(|member| {
                let days_out = self.absences.absences_in(&member.id, &period);
                Member {
                    days_out,
                    days_in: (period.total_days - days_out).max(0),
                    ..member.clone()
                }
            })
            .collect()
    }

    /// Runs the configured allocation policy over the derived roster.
    pub fn calculate(&self) -> SessionResult<BillCalculation> {
        Ok(calculate_bill(
            &self.members(),
            self.settings.total_bill,
            self.settings.total_days,
            self.settings.policy,
        )?)
    }

    pub fn summary(&self) -> SessionResult<BillSummary> {
        let calculation = self.calculate()?;
        Ok(BillSummary::from_calculation(
            self.settings.total_bill,
            self.settings.total_days,
            &calculation,
        ))
    }

    fn update_settings(&mut self, apply: impl FnOnce(&mut BillSettings)) -> SessionResult<()> {
        let mut next = self.settings.clone();
        apply(&mut next);
        next.validate()?;
        self.settings = next;
        info!(
            "event=settings_updated module=session days={} policy={}",
            self.settings.total_days, self.settings.policy
        );
        Ok(())
    }

    fn position(&self, member_id: &str) -> Option<usize> {
        self.roster.iter().position(|member| member.id == member_id)
    }

    fn require_member(&self, member_id: &str) -> SessionResult<usize> {
        self.position(member_id)
            .ok_or_else(|| SessionError::UnknownMember(member_id.to_string()))
    }

    fn require_period_date(&self, date: NaiveDate) -> SessionResult<()> {
        if !self.settings.period().contains(date) {
            return Err(SessionError::DateOutsidePeriod(date));
        }
        Ok(())
    }
}

fn normalize_name(name: &str) -> SessionResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SessionError::EmptyName);
    }
    Ok(trimmed.to_string())
}
