//! Allocation error taxonomy.

use crate::model::member::{MemberId, MemberValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AllocationResult<T> = Result<T, AllocationError>;

/// Rejected allocation input.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// `total_days` must be strictly positive.
    InvalidPeriod { total_days: i64 },
    /// A per-day policy was asked to walk more than `max` days.
    PeriodTooLong { total_days: i64, max: i64 },
    /// A member failed [`Member::validate`](crate::Member::validate).
    InvalidMember {
        member_id: MemberId,
        source: MemberValidationError,
    },
    /// Two members share the same id.
    DuplicateMember(MemberId),
    /// `total_bill` is negative, `NaN`, or infinite.
    InvalidBill(f64),
    /// No member-days to spread the bill over.
    DegenerateInput,
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPeriod { total_days } => {
                write!(f, "billing period must be at least one day, got {total_days}")
            }
            Self::PeriodTooLong { total_days, max } => write!(
                f,
                "daily policies support at most {max} days, got {total_days}"
            ),
            Self::InvalidMember { member_id, source } => {
                write!(f, "invalid member `{member_id}`: {source}")
            }
            Self::DuplicateMember(member_id) => write!(f, "duplicate member id `{member_id}`"),
            Self::InvalidBill(value) => {
                write!(f, "total bill must be a finite amount >= 0, got {value}")
            }
            Self::DegenerateInput => write!(f, "no member-days to allocate the bill over"),
        }
    }
}

impl Error for AllocationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidMember { source, .. } => Some(source),
            Self::InvalidPeriod { .. }
            | Self::PeriodTooLong { .. }
            | Self::DuplicateMember(_)
            | Self::InvalidBill(_)
            | Self::DegenerateInput => None,
        }
    }
}
