//! Flutter-facing bindings for the coffee catalog.
//!
//! Everything exported here is sync, panic-free and returns plain
//! envelopes; typed core errors never cross the boundary.

pub mod api;
