//! Fairness policy selector.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a bill is spread over members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Proportional to each member's present days (member-day weighting).
    #[default]
    MemberDay,
    /// Per-day equal split; a member counts as present on day `d`
    /// (1-based) while `days_out < d`.
    DailyByAbsence,
    /// Per-day equal split; a member counts as present on day index `i`
    /// (0-based) while `i < days_in`.
    DailyByPresence,
}

impl AllocationPolicy {
    pub const ALL: [AllocationPolicy; 3] = [
        AllocationPolicy::MemberDay,
        AllocationPolicy::DailyByAbsence,
        AllocationPolicy::DailyByPresence,
    ];

    /// Stable label used in logs and wire payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MemberDay => "member_day",
            Self::DailyByAbsence => "daily_by_absence",
            Self::DailyByPresence => "daily_by_presence",
        }
    }
}

impl Display for AllocationPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicyError(pub String);

impl Display for UnknownPolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown allocation policy `{}`; expected member_day|daily_by_absence|daily_by_presence",
            self.0
        )
    }
}

impl Error for UnknownPolicyError {}

impl FromStr for AllocationPolicy {
    type Err = UnknownPolicyError;

    /// Accepts snake_case or kebab-case labels, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == normalized)
            .ok_or_else(|| UnknownPolicyError(value.trim().to_string()))
    }
}
