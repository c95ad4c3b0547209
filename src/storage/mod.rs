//! SQLite storage layer for Periodical.
//!
//! Provides:
//! - The [`Database`] handle owning a single connection
//! - Connection pragmas and schema initialization
//! - Fixture seeding for demos and tests

pub mod schema;
pub mod seed;

use rusqlite::Connection;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use schema::{apply_pragmas, initialize_schema};

/// Path reported for in-memory databases.
const IN_MEMORY: &str = ":memory:";

/// Owned handle to one SQLite connection.
///
/// The handle is passed explicitly to every query. Model functions take
/// `&Connection`, which a `&Database` coerces to; the transaction helpers
/// take `&mut Connection`. Dropping the handle closes the connection.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the database file at `path`.
    ///
    /// Foreign key enforcement is switched on before the handle is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the file cannot be opened or
    /// the connection cannot be configured.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| Error::StorageUnavailable {
            path: path.clone(),
            source,
        })?;
        Self::configure(conn, path)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(IN_MEMORY);
        let conn = Connection::open_in_memory().map_err(|source| Error::StorageUnavailable {
            path: path.clone(),
            source,
        })?;
        Self::configure(conn, path)
    }

    fn configure(conn: Connection, path: PathBuf) -> Result<Self> {
        if let Err(source) = apply_pragmas(&conn) {
            return Err(Error::StorageUnavailable { path, source });
        }
        // Opening is lazy; read the header now so a corrupt or foreign file
        // fails here instead of on the first query.
        if let Err(source) = verify_readable(&conn) {
            return Err(Error::StorageUnavailable { path, source });
        }
        tracing::info!(path = %path.display(), "Opened database");
        Ok(Self { conn, path })
    }

    /// Create the tables and indexes if they do not exist yet.
    pub fn initialize(&self) -> Result<()> {
        initialize_schema(&self.conn).map_err(|err| Error::at_path(&self.path, err))?;
        tracing::info!(path = %self.path.display(), "Schema initialized");
        Ok(())
    }

    /// Path this handle was opened with (`:memory:` for in-memory databases).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, err)| Error::from(err))?;
        tracing::debug!(path = %path.display(), "Closed database");
        Ok(())
    }
}

fn verify_readable(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

impl Deref for Database {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl DerefMut for Database {
    fn deref_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

/// In-memory database with the schema applied and the fixture loaded.
#[cfg(test)]
pub(crate) fn seeded_database() -> Database {
    let mut db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();
    seed::seed_database(&mut db).unwrap();
    db
}
