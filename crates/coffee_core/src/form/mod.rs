//! Input gate between front-ends and persistence.
//!
//! # Responsibility
//! - Turn raw form text into a normalized `CoffeeDraft` or a typed error.
//!
//! # Invariants
//! - Validation is pure: no storage access, no retained state.

pub mod validator;
