//! Core use-case services.
//!
//! # Responsibility
//! - Hold in-memory billing state and route every edit through one place.
//! - Shape allocation output for presentation surfaces.
//!
//! # Invariants
//! - Services never persist state; a session lives as long as its owner.
//! - The allocator is called on demand after state transitions, never cached.

pub mod session;
pub mod summary;
