//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection settings required by core behavior.
//! - Ensure the catalog table exists before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have the `coffee` table available.
//! - A connection that fails bootstrap is dropped, never returned.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection open behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Create an empty database file when none exists at the path.
    pub create_if_missing: bool,
    /// How long SQLite waits on a locked file before failing.
    pub busy_timeout: Duration,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Opens a SQLite database file and ensures the catalog table.
///
/// # Errors
/// - `DbError::MissingDatabase` when the file is absent and
///   `options.create_if_missing` is false.
/// - `DbError::Sqlite` when the file cannot be opened or is not a database.
///
/// # Side effects
/// - May create the database file and the `coffee` table.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, options: OpenOptions) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    if !options.create_if_missing && !path.exists() {
        error!(
            "event=db_open module=db status=error mode=file duration_ms={} error_code=db_missing",
            started_at.elapsed().as_millis()
        );
        return Err(DbError::MissingDatabase(path.to_path_buf()));
    }

    let flags = if options.create_if_missing {
        OpenFlags::default()
    } else {
        OpenFlags::default().difference(OpenFlags::SQLITE_OPEN_CREATE)
    };

    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_bootstrap(conn, options, started_at, "file")
}

/// Opens an in-memory SQLite database with the catalog table in place.
///
/// Data lives only as long as the returned connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_bootstrap(conn, OpenOptions::default(), started_at, "memory")
}

fn finish_bootstrap(
    conn: Connection,
    options: OpenOptions,
    started_at: Instant,
    mode: &str,
) -> DbResult<Connection> {
    match bootstrap_connection(&conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection, options: OpenOptions) -> DbResult<()> {
    conn.busy_timeout(options.busy_timeout)?;
    ensure_schema(conn)?;
    Ok(())
}
