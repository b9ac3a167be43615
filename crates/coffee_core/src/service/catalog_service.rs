//! Catalog use-case service.
//!
//! # Responsibility
//! - Run the validate-then-persist flow for add and edit actions.
//! - Produce the listing a front-end renders, with its status message.
//!
//! # Invariants
//! - Form validation completes before any storage call; a rejected form
//!   has no side effects.
//! - `edit` never creates a record.
//! - `edit` does not read the target row first, so a row holding invalid
//!   data can still be overwritten with a valid one.

use crate::form::validator::{validate_form, CoffeeForm};
use crate::model::coffee::{CoffeeId, CoffeeRecord};
use crate::service::coffee_store::{CoffeeStore, StoreError, StoreResult};
use log::warn;

/// Listing envelope for the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    /// Records in storage-native order.
    pub records: Vec<CoffeeRecord>,
    /// Ids of stored rows that could not be read.
    pub skipped: Vec<CoffeeId>,
    /// Short status line, e.g. `Loaded 3 records.`.
    pub message: String,
}

/// Use-case service over a `CoffeeStore`.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: CoffeeStore,
}

impl CatalogService {
    pub fn new(store: CoffeeStore) -> Self {
        Self { store }
    }

    /// Loads every readable record for display.
    ///
    /// Unreadable rows are named in the status line instead of failing the
    /// whole listing.
    pub fn load_catalog(&self) -> StoreResult<CatalogSummary> {
        let listing = self.store.list_all()?;
        let message = if listing.skipped.is_empty() {
            format!("Loaded {} records.", listing.records.len())
        } else {
            format!(
                "Loaded {} records, skipped {} unreadable.",
                listing.records.len(),
                listing.skipped.len()
            )
        };
        Ok(CatalogSummary {
            records: listing.records,
            skipped: listing.skipped,
            message,
        })
    }

    /// Fetches one record, e.g. to prefill an edit form.
    pub fn record(&self, id: CoffeeId) -> StoreResult<CoffeeRecord> {
        self.store.get_by_id(id)
    }

    /// Validates an add form and inserts the resulting record.
    pub fn add(&self, form: &CoffeeForm) -> StoreResult<CoffeeId> {
        let draft = validate_form(form).map_err(|err| {
            warn!(
                "event=catalog_add module=service status=rejected error_code={}",
                err.code()
            );
            StoreError::Validation(err)
        })?;
        self.store.insert(&draft)
    }

    /// Validates an edit form and overwrites record `id`.
    ///
    /// # Errors
    /// - `StoreError::Validation` before any storage access.
    /// - `StoreError::NotFound` when no row has `id`.
    pub fn edit(&self, id: CoffeeId, form: &CoffeeForm) -> StoreResult<()> {
        let draft = validate_form(form).map_err(|err| {
            warn!(
                "event=catalog_edit module=service status=rejected coffee_id={} error_code={}",
                id,
                err.code()
            );
            StoreError::Validation(err)
        })?;
        self.store.update(id, &draft)
    }
}
