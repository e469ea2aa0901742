//! Domain model for attendance-weighted bill sharing.
//!
//! # Responsibility
//! - Define the members, billing period, and attendance records that feed
//!   the allocator.
//! - Define the derived per-member calculation shape returned to callers.
//!
//! # Invariants
//! - Attendance has exactly one source of truth: the [`AbsenceLedger`].
//!   Member day counters are derived from it by the session layer.
//! - Calculations are recomputed on demand and never stored independently.
//!
//! [`AbsenceLedger`]: attendance::AbsenceLedger

pub mod attendance;
pub mod calculation;
pub mod member;
pub mod period;
