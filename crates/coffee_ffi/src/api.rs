//! FFI use-case API for the catalog window.
//!
//! # Responsibility
//! - Expose list/get/add/edit and the closed option lists to Dart via FRB.
//! - Turn typed core errors into user-facing messages and stable codes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens and releases its own database connection.
//! - The database path is fixed for the process once first resolved.

use coffee_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_coffee_state,
    parse_roast_degree, ping as ping_inner, CatalogService, CoffeeForm, CoffeeRecord,
    CoffeeState, CoffeeStore, FormField, RoastDegree, StoreConfig, StoreError, ValidationError,
    DEFAULT_DB_FILE_NAME,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const DB_PATH_ENV: &str = "COFFEE_DB_PATH";
const INVALID_SELECTION_CODE: &str = "invalid_selection";
static CATALOG_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the catalog database file for this process.
///
/// # FFI contract
/// - Must run before the first catalog call to take effect.
/// - Repeating the same path is accepted; a different path is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }

    let requested = PathBuf::from(trimmed);
    let active = CATALOG_DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "catalog database already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Roast degree values for the selection control, in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn roast_degree_options() -> Vec<String> {
    RoastDegree::ALL
        .iter()
        .map(|degree| degree.as_str().to_string())
        .collect()
}

/// Coffee state values for the selection control, in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn coffee_state_options() -> Vec<String> {
    CoffeeState::ALL
        .iter()
        .map(|state| state.as_str().to_string())
        .collect()
}

/// One table row as rendered by the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeItem {
    pub id: i64,
    pub sort_name: String,
    /// One of `roast_degree_options()`.
    pub roast_degree: String,
    /// One of `coffee_state_options()`.
    pub state: String,
    pub flavor_description: String,
    pub price: f64,
    /// Grams per package; `None` when not specified.
    pub package_volume: Option<u32>,
}

/// Listing envelope for the catalog table.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogListResponse {
    pub ok: bool,
    pub items: Vec<CoffeeItem>,
    /// Ids of stored rows left out because they hold invalid data.
    pub skipped_ids: Vec<i64>,
    /// Status-bar text on success, error text on failure.
    pub message: String,
    pub error_code: Option<String>,
}

/// Single-record envelope, used to prefill the edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecordResponse {
    pub ok: bool,
    pub item: Option<CoffeeItem>,
    pub message: String,
    pub error_code: Option<String>,
}

/// Result envelope for add/edit actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogActionResponse {
    pub ok: bool,
    /// Id of the created or edited record.
    pub coffee_id: Option<i64>,
    pub message: String,
    pub error_code: Option<String>,
}

impl CatalogActionResponse {
    fn success(message: impl Into<String>, coffee_id: i64) -> Self {
        Self {
            ok: true,
            coffee_id: Some(coffee_id),
            message: message.into(),
            error_code: None,
        }
    }

    fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            coffee_id: None,
            message: message.into(),
            error_code: Some(code.to_string()),
        }
    }
}

/// Loads every catalog record.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - On success `message` reads `Loaded N records.`; unreadable rows are
///   listed in `skipped_ids` and counted in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_list() -> CatalogListResponse {
    match catalog_service().load_catalog() {
        Ok(summary) => CatalogListResponse {
            ok: true,
            items: summary.records.into_iter().map(to_coffee_item).collect(),
            skipped_ids: summary.skipped,
            message: summary.message,
            error_code: None,
        },
        Err(err) => CatalogListResponse {
            ok: false,
            items: Vec::new(),
            skipped_ids: Vec::new(),
            message: user_message(&err),
            error_code: Some(err.code().to_string()),
        },
    }
}

/// Loads one record by id.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_get(id: i64) -> CatalogRecordResponse {
    match catalog_service().record(id) {
        Ok(record) => CatalogRecordResponse {
            ok: true,
            item: Some(to_coffee_item(record)),
            message: String::new(),
            error_code: None,
        },
        Err(err) => CatalogRecordResponse {
            ok: false,
            item: None,
            message: user_message(&err),
            error_code: Some(err.code().to_string()),
        },
    }
}

/// Validates add-dialog fields and creates a record.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `roast_degree` / `state` must come from the option lists.
/// - Validation failures return `ok=false` without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_add(
    sort_name: String,
    roast_degree: String,
    state: String,
    flavor_description: String,
    price: String,
    package_volume: String,
) -> CatalogActionResponse {
    let form = match build_form(
        sort_name,
        &roast_degree,
        &state,
        flavor_description,
        price,
        package_volume,
    ) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match catalog_service().add(&form) {
        Ok(id) => CatalogActionResponse::success("Coffee added.", id),
        Err(err) => CatalogActionResponse::failure(err.code(), user_message(&err)),
    }
}

/// Validates edit-dialog fields and overwrites record `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_edit(
    id: i64,
    sort_name: String,
    roast_degree: String,
    state: String,
    flavor_description: String,
    price: String,
    package_volume: String,
) -> CatalogActionResponse {
    let form = match build_form(
        sort_name,
        &roast_degree,
        &state,
        flavor_description,
        price,
        package_volume,
    ) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match catalog_service().edit(id, &form) {
        Ok(()) => CatalogActionResponse::success("Coffee updated.", id),
        Err(err) => CatalogActionResponse::failure(err.code(), user_message(&err)),
    }
}

fn build_form(
    sort_name: String,
    roast_degree: &str,
    state: &str,
    flavor_description: String,
    price: String,
    package_volume: String,
) -> Result<CoffeeForm, CatalogActionResponse> {
    let roast_degree = parse_roast_degree(roast_degree)
        .map_err(|err| CatalogActionResponse::failure(INVALID_SELECTION_CODE, err))?;
    let state = parse_coffee_state(state)
        .map_err(|err| CatalogActionResponse::failure(INVALID_SELECTION_CODE, err))?;

    Ok(CoffeeForm {
        sort_name,
        roast_degree,
        state,
        flavor_description,
        price,
        package_volume,
    })
}

fn resolve_catalog_db_path() -> PathBuf {
    CATALOG_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
        })
        .clone()
}

fn catalog_service() -> CatalogService {
    CatalogService::new(CoffeeStore::new(StoreConfig::with_path(
        resolve_catalog_db_path(),
    )))
}

fn user_message(err: &StoreError) -> String {
    match err {
        StoreError::Validation(err) => validation_message(err).to_string(),
        StoreError::StorageUnavailable { path, source } => format!(
            "Could not open the database `{}`.\n{source}",
            path.display()
        ),
        StoreError::QueryFailed(source) => format!("The database query failed.\n{source}"),
        StoreError::NotFound(id) => format!("Coffee record {id} does not exist."),
        StoreError::InvalidData(detail) => format!("Stored catalog data is invalid: {detail}"),
    }
}

fn validation_message(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::MissingRequiredField {
            field: FormField::SortName,
        } => "Sort name is required.",
        ValidationError::MissingRequiredField {
            field: FormField::Price,
        } => "Price is required.",
        ValidationError::InvalidPrice { .. } => "Price must be a number greater than zero.",
        ValidationError::InvalidVolume { .. } => {
            "Package volume must be a positive whole number."
        }
    }
}

fn to_coffee_item(record: CoffeeRecord) -> CoffeeItem {
    CoffeeItem {
        id: record.id,
        sort_name: record.sort_name,
        roast_degree: record.roast_degree.as_str().to_string(),
        state: record.state.as_str().to_string(),
        flavor_description: record.flavor_description,
        price: record.price,
        package_volume: record.package_volume,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        catalog_add, catalog_edit, catalog_get, catalog_list, coffee_state_options,
        configure_db_path, core_version, init_logging, ping, roast_degree_options,
        resolve_catalog_db_path,
    };
    use coffee_core::DEFAULT_DB_FILE_NAME;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    static TEST_DB_DIR: OnceLock<TempDir> = OnceLock::new();

    /// Pins this test process to a scratch database before any catalog call.
    fn use_scratch_database() {
        let dir = TEST_DB_DIR.get_or_init(|| tempfile::tempdir().expect("temp dir should exist"));
        let path = dir.path().join(DEFAULT_DB_FILE_NAME);
        let message = configure_db_path(path.display().to_string());
        assert!(message.is_empty(), "{message}");
        assert_eq!(resolve_catalog_db_path(), path);
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn option_lists_match_core_values() {
        assert_eq!(roast_degree_options(), ["light", "medium", "dark"]);
        assert_eq!(coffee_state_options(), ["bean", "ground"]);
    }

    #[test]
    fn configure_db_path_rejects_empty_and_conflicting_paths() {
        assert!(!configure_db_path("   ".to_string()).is_empty());

        use_scratch_database();
        let active = resolve_catalog_db_path();
        let same = configure_db_path(active.display().to_string());
        assert!(same.is_empty(), "{same}");

        let other = configure_db_path("/definitely/another/coffee.sqlite".to_string());
        assert!(other.contains("refusing to switch"), "{other}");
    }

    #[test]
    fn catalog_add_then_get_and_list() {
        use_scratch_database();
        let name = unique_token("add");
        let created = catalog_add(
            name.clone(),
            "Medium".to_string(),
            "bean".to_string(),
            "nutty".to_string(),
            "450".to_string(),
            "250".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let id = created.coffee_id.expect("add should return coffee_id");

        let fetched = catalog_get(id);
        assert!(fetched.ok, "{}", fetched.message);
        let item = fetched.item.expect("record should be present");
        assert_eq!(item.sort_name, name);
        assert_eq!(item.roast_degree, "medium");
        assert_eq!(item.price, 450.0);
        assert_eq!(item.package_volume, Some(250));

        let listing = catalog_list();
        assert!(listing.ok, "{}", listing.message);
        assert!(listing.items.iter().any(|row| row.id == id));
        assert!(listing.skipped_ids.is_empty());
        assert!(listing.message.starts_with("Loaded "));
    }

    #[test]
    fn catalog_add_reports_validation_messages() {
        use_scratch_database();
        let missing = catalog_add(
            String::new(),
            "dark".to_string(),
            "ground".to_string(),
            String::new(),
            "100".to_string(),
            String::new(),
        );
        assert!(!missing.ok);
        assert_eq!(missing.message, "Sort name is required.");
        assert_eq!(missing.error_code.as_deref(), Some("validation_error"));

        let bad_volume = catalog_add(
            "X".to_string(),
            "dark".to_string(),
            "ground".to_string(),
            String::new(),
            "10".to_string(),
            "0".to_string(),
        );
        assert!(!bad_volume.ok);
        assert_eq!(
            bad_volume.message,
            "Package volume must be a positive whole number."
        );
    }

    #[test]
    fn catalog_add_rejects_unknown_selection() {
        use_scratch_database();
        let response = catalog_add(
            "X".to_string(),
            "burnt".to_string(),
            "bean".to_string(),
            String::new(),
            "10".to_string(),
            String::new(),
        );
        assert!(!response.ok);
        assert_eq!(response.error_code.as_deref(), Some("invalid_selection"));
    }

    #[test]
    fn catalog_edit_updates_existing_and_reports_missing() {
        use_scratch_database();
        let created = catalog_add(
            unique_token("edit"),
            "light".to_string(),
            "bean".to_string(),
            String::new(),
            "99.5".to_string(),
            String::new(),
        );
        let id = created.coffee_id.expect("add should return coffee_id");

        let edited = catalog_edit(
            id,
            "Edited".to_string(),
            "dark".to_string(),
            "ground".to_string(),
            "smoky".to_string(),
            "120".to_string(),
            "500".to_string(),
        );
        assert!(edited.ok, "{}", edited.message);
        let item = catalog_get(id).item.expect("edited record should exist");
        assert_eq!(item.sort_name, "Edited");
        assert_eq!(item.state, "ground");
        assert_eq!(item.package_volume, Some(500));

        let missing = catalog_edit(
            i64::MAX,
            "Ghost".to_string(),
            "dark".to_string(),
            "ground".to_string(),
            String::new(),
            "1".to_string(),
            String::new(),
        );
        assert!(!missing.ok);
        assert_eq!(missing.error_code.as_deref(), Some("not_found"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
