//! Coffee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/insert/update over the `coffee` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `CoffeeDraft::validate()` before SQL mutations.
//! - Read paths never coerce invalid persisted state: `get_by_id` rejects
//!   such a row, `list_all` leaves it out and reports its id.
//! - `update` reports `NotFound` when no row matches the id.

use crate::db::DbError;
use crate::model::coffee::{
    CoffeeDraft, CoffeeId, CoffeeRecord, CoffeeState, RoastDegree, ValidationError,
};
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const COFFEE_SELECT_SQL: &str = "SELECT
    ID,
    sort_name,
    roast_degree,
    state,
    flavor_description,
    price,
    package_volume
FROM coffee";

pub type RepoResult<T> = Result<T, RepoError>;

/// Result of a full-table read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeListing {
    /// Readable records in storage-native order.
    pub records: Vec<CoffeeRecord>,
    /// Ids of rows left out because they break record invariants.
    pub skipped: Vec<CoffeeId>,
}

/// Repository error for coffee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(CoffeeId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "coffee record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted coffee data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for coffee catalog operations.
///
/// There is deliberately no delete.
pub trait CoffeeRepository {
    /// Returns every readable record in storage-native order, plus the ids
    /// of rows that hold invalid data.
    fn list_all(&self) -> RepoResult<CoffeeListing>;
    /// Returns one record, or `None` when no row has this id.
    fn get_by_id(&self, id: CoffeeId) -> RepoResult<Option<CoffeeRecord>>;
    /// Persists a new row and returns the storage-assigned id.
    fn insert(&self, draft: &CoffeeDraft) -> RepoResult<CoffeeId>;
    /// Overwrites every mutable field of the row with this id.
    fn update(&self, id: CoffeeId, draft: &CoffeeDraft) -> RepoResult<()>;
}

/// SQLite-backed coffee repository.
pub struct SqliteCoffeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCoffeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CoffeeRepository for SqliteCoffeeRepository<'_> {
    fn list_all(&self) -> RepoResult<CoffeeListing> {
        let mut stmt = self.conn.prepare(COFFEE_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut listing = CoffeeListing::default();

        while let Some(row) = rows.next()? {
            match parse_coffee_row(row) {
                Ok(record) => listing.records.push(record),
                Err(RepoError::InvalidData(_)) => listing.skipped.push(row.get("ID")?),
                Err(err) => return Err(err),
            }
        }

        Ok(listing)
    }

    fn get_by_id(&self, id: CoffeeId) -> RepoResult<Option<CoffeeRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COFFEE_SELECT_SQL} WHERE ID = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_coffee_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, draft: &CoffeeDraft) -> RepoResult<CoffeeId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO coffee (
                sort_name,
                roast_degree,
                state,
                flavor_description,
                price,
                package_volume
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.sort_name.as_str(),
                draft.roast_degree.as_str(),
                draft.state.as_str(),
                draft.flavor_description.as_str(),
                draft.price,
                draft.package_volume,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, id: CoffeeId, draft: &CoffeeDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE coffee
             SET
                sort_name = ?1,
                roast_degree = ?2,
                state = ?3,
                flavor_description = ?4,
                price = ?5,
                package_volume = ?6
             WHERE ID = ?7;",
            params![
                draft.sort_name.as_str(),
                draft.roast_degree.as_str(),
                draft.state.as_str(),
                draft.flavor_description.as_str(),
                draft.price,
                draft.package_volume,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_coffee_row(row: &Row<'_>) -> RepoResult<CoffeeRecord> {
    let id: CoffeeId = row.get("ID")?;

    let roast_text: String = column(row, "roast_degree", id)?;
    let roast_degree = RoastDegree::parse(&roast_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid roast degree `{roast_text}` in coffee.roast_degree (ID {id})"
        ))
    })?;

    let state_text: String = column(row, "state", id)?;
    let state = CoffeeState::parse(&state_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid state `{state_text}` in coffee.state (ID {id})"
        ))
    })?;

    let package_volume = match column::<Option<i64>>(row, "package_volume", id)? {
        Some(value) => Some(
            u32::try_from(value)
                .ok()
                .filter(|volume| *volume > 0)
                .ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "invalid package volume `{value}` in coffee.package_volume (ID {id})"
                    ))
                })?,
        ),
        None => None,
    };

    let record = CoffeeRecord {
        id,
        sort_name: column(row, "sort_name", id)?,
        roast_degree,
        state,
        flavor_description: column::<Option<String>>(row, "flavor_description", id)?
            .unwrap_or_default(),
        price: column(row, "price", id)?,
        package_volume,
    };

    record.to_draft().validate().map_err(|err| {
        RepoError::InvalidData(format!("coffee row ID {id} violates invariants: {err}"))
    })?;
    Ok(record)
}

/// Reads one column, treating a stored value of the wrong type as invalid data.
fn column<T: FromSql>(row: &Row<'_>, name: &str, id: CoffeeId) -> RepoResult<T> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            RepoError::InvalidData(format!("unreadable coffee.{name} (ID {id}): {err}"))
        }
        other => RepoError::from(other),
    })
}
