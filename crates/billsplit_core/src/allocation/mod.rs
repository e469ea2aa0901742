//! Bill allocation across members.
//!
//! # Responsibility
//! - Turn a total bill, a billing period length, and member presence
//!   counts into per-member owed amounts.
//! - Offer three mutually exclusive fairness policies behind one entry
//!   point, selected explicitly by the caller.
//!
//! # Invariants
//! - Allocation is pure: inputs are borrowed immutably and no state is kept.
//! - No division is performed with a zero or negative divisor; invalid
//!   input is rejected before any arithmetic.
//! - An empty roster always yields an empty calculation.

pub mod allocator;
pub mod error;
pub mod policy;

pub use allocator::{calculate_bill, member_day_rate, MAX_TOTAL_DAYS};
pub use error::{AllocationError, AllocationResult};
pub use policy::{AllocationPolicy, UnknownPolicyError};
