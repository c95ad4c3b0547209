//! Author records.

use rusqlite::{params, Connection, Row};
use serde::Serialize;
use std::fmt;

use super::{count_rows, query_all, query_first, Article, Magazine};
use crate::error::{require_text, Result};

/// A writer of articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

impl Author {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build from a row whose first two columns are `id, name`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self::new(row.get(0)?, row.get::<_, String>(1)?))
    }

    /// Insert a new author and return it with its assigned id.
    pub fn create(conn: &Connection, name: &str) -> Result<Self> {
        require_text("author", "name", name)?;
        conn.execute("INSERT INTO authors (name) VALUES (?1)", params![name])?;
        let author = Self::new(conn.last_insert_rowid(), name);
        tracing::debug!(author_id = author.id, "Inserted author");
        Ok(author)
    }

    /// Every author, in id order.
    pub fn all(conn: &Connection) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, name FROM authors ORDER BY id",
            [],
            Self::from_row,
        )
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT id, name FROM authors WHERE id = ?1",
            params![id],
            Self::from_row,
        )
    }

    /// First author (lowest id) with exactly this name.
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT id, name FROM authors WHERE name = ?1 ORDER BY id LIMIT 1",
            params![name],
            Self::from_row,
        )
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        count_rows(conn, "SELECT COUNT(*) FROM authors")
    }

    /// Articles written by this author.
    pub fn articles(&self, conn: &Connection) -> Result<Vec<Article>> {
        Article::find_by_author_id(conn, self.id)
    }

    /// Distinct magazines this author has written for.
    pub fn magazines(&self, conn: &Connection) -> Result<Vec<Magazine>> {
        query_all(
            conn,
            "SELECT DISTINCT m.id, m.name, m.category
             FROM magazines m
             JOIN articles ar ON ar.magazine_id = m.id
             WHERE ar.author_id = ?1
             ORDER BY m.id",
            params![self.id],
            Magazine::from_row,
        )
    }

    /// Distinct magazine categories this author has written in, alphabetically.
    pub fn topic_areas(&self, conn: &Connection) -> Result<Vec<String>> {
        query_all(
            conn,
            "SELECT DISTINCT m.category
             FROM magazines m
             JOIN articles ar ON ar.magazine_id = m.id
             WHERE ar.author_id = ?1
             ORDER BY m.category",
            params![self.id],
            |row| row.get(0),
        )
    }

    /// The author with the most articles.
    ///
    /// Ties go to the lowest id. Returns `None` when no articles exist.
    pub fn most_prolific(conn: &Connection) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT a.id, a.name
             FROM authors a
             JOIN articles ar ON ar.author_id = a.id
             GROUP BY a.id, a.name
             ORDER BY COUNT(ar.id) DESC, a.id ASC
             LIMIT 1",
            [],
            Self::from_row,
        )
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Author {}: {}", self.id, self.name)
    }
}
