//! Shared fixtures for integration tests.
//!
//! Provides:
//! - A seeded database file inside a temporary directory
//! - Direct count queries used to cross-check the model layer

#![allow(dead_code)]

use periodical::storage::seed::seed_database;
use periodical::Database;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture that manages a temporary database file.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestFixture {
    /// Create a new fixture with an empty temporary directory.
    pub fn new() -> Self {
        periodical::observability::tracing::init_test_tracing();
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("articles.db");
        Self { temp_dir, db_path }
    }

    /// Open the fixture's database with the schema applied and seed rows loaded.
    pub fn seeded(&self) -> Database {
        let mut db = Database::open(&self.db_path).expect("failed to open database");
        db.initialize().expect("failed to create schema");
        seed_database(&mut db).expect("failed to seed database");
        db
    }

    /// Open a second handle on the same file.
    pub fn reopen(&self) -> Database {
        Database::open(&self.db_path).expect("failed to reopen database")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Row count of `table`, bypassing the model layer.
pub fn count(db: &Database, table: &str) -> i64 {
    db.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count query failed")
}

/// Number of articles matching `column = id`, bypassing the model layer.
pub fn count_where(db: &Database, column: &str, id: i64) -> i64 {
    db.query_row(
        &format!("SELECT COUNT(*) FROM articles WHERE {column} = ?1"),
        [id],
        |row| row.get(0),
    )
    .expect("count query failed")
}
