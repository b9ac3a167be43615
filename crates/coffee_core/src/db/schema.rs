//! Catalog table bootstrap.
//!
//! The catalog is a single table; there is no version tracking. The script
//! only creates `coffee` when it is absent, so databases produced by older
//! tools are used as they are.

use super::DbResult;
use rusqlite::Connection;

/// Name of the only table the catalog owns.
pub const COFFEE_TABLE: &str = "coffee";

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `coffee` table when it does not exist yet.
///
/// Also forces SQLite to read the file header, so a file that is not a
/// database fails here rather than on the first query.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether the `coffee` table is present.
pub fn has_coffee_table(conn: &Connection) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [COFFEE_TABLE],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
