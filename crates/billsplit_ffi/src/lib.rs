//! Flutter-facing bindings over `billsplit_core`.

pub mod api;
