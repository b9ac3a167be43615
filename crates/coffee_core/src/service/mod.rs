//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repository calls in per-operation connection scopes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod catalog_service;
pub mod coffee_store;
