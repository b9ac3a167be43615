//! Core logic for the coffee catalog.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DEFAULT_DB_FILE_NAME};
pub use form::validator::{parse_coffee_state, parse_roast_degree, validate_form, CoffeeForm};
pub use logging::{default_log_level, init_logging};
pub use model::coffee::{
    CoffeeDraft, CoffeeId, CoffeeRecord, CoffeeState, FormField, RoastDegree, ValidationError,
};
pub use repo::coffee_repo::{
    CoffeeListing, CoffeeRepository, RepoError, RepoResult, SqliteCoffeeRepository,
};
pub use service::catalog_service::{CatalogService, CatalogSummary};
pub use service::coffee_store::{CoffeeStore, StoreError, StoreResult};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
