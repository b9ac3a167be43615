//! Coffee catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Records are identified by a storage-assigned `CoffeeId`.
//! - Records are never deleted by core code.

pub mod coffee;
