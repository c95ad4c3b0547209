//! Magazine records and the aggregate queries built on them.

use rusqlite::{params, Connection, Row};
use serde::Serialize;
use std::fmt;

use super::{count_rows, query_all, query_first, Article, Author};
use crate::error::{require_text, Result};

/// Authors need strictly more than this many articles in one magazine to
/// count as contributing authors of it.
const CONTRIBUTING_AUTHOR_THRESHOLD: i64 = 2;

/// A publication articles appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Magazine {
    pub id: i64,
    pub name: String,
    pub category: String,
}

/// A magazine paired with how many articles it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagazineArticleCount {
    #[serde(flatten)]
    pub magazine: Magazine,
    pub article_count: i64,
}

impl Magazine {
    pub fn new(id: i64, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
        }
    }

    /// Build from a row whose first three columns are `id, name, category`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self::new(
            row.get(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    }

    /// Insert a new magazine and return it with its assigned id.
    pub fn create(conn: &Connection, name: &str, category: &str) -> Result<Self> {
        require_text("magazine", "name", name)?;
        require_text("magazine", "category", category)?;
        conn.execute(
            "INSERT INTO magazines (name, category) VALUES (?1, ?2)",
            params![name, category],
        )?;
        let magazine = Self::new(conn.last_insert_rowid(), name, category);
        tracing::debug!(magazine_id = magazine.id, "Inserted magazine");
        Ok(magazine)
    }

    /// Every magazine, in id order.
    pub fn all(conn: &Connection) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, name, category FROM magazines ORDER BY id",
            [],
            Self::from_row,
        )
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT id, name, category FROM magazines WHERE id = ?1",
            params![id],
            Self::from_row,
        )
    }

    /// First magazine (lowest id) with exactly this name.
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT id, name, category FROM magazines WHERE name = ?1 ORDER BY id LIMIT 1",
            params![name],
            Self::from_row,
        )
    }

    /// Every magazine in `category`.
    pub fn find_by_category(conn: &Connection, category: &str) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, name, category FROM magazines WHERE category = ?1 ORDER BY id",
            params![category],
            Self::from_row,
        )
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        count_rows(conn, "SELECT COUNT(*) FROM magazines")
    }

    /// Articles published in this magazine.
    pub fn articles(&self, conn: &Connection) -> Result<Vec<Article>> {
        Article::find_by_magazine_id(conn, self.id)
    }

    /// Distinct authors who have written for this magazine.
    pub fn contributors(&self, conn: &Connection) -> Result<Vec<Author>> {
        query_all(
            conn,
            "SELECT DISTINCT a.id, a.name
             FROM authors a
             JOIN articles ar ON ar.author_id = a.id
             WHERE ar.magazine_id = ?1
             ORDER BY a.id",
            params![self.id],
            Author::from_row,
        )
    }

    /// Titles of this magazine's articles, in article id order.
    pub fn article_titles(&self, conn: &Connection) -> Result<Vec<String>> {
        query_all(
            conn,
            "SELECT title FROM articles WHERE magazine_id = ?1 ORDER BY id",
            params![self.id],
            |row| row.get(0),
        )
    }

    /// Authors with more than two articles in this magazine.
    pub fn contributing_authors(&self, conn: &Connection) -> Result<Vec<Author>> {
        query_all(
            conn,
            "SELECT a.id, a.name
             FROM authors a
             JOIN articles ar ON ar.author_id = a.id
             WHERE ar.magazine_id = ?1
             GROUP BY a.id, a.name
             HAVING COUNT(ar.id) > ?2
             ORDER BY a.id",
            params![self.id, CONTRIBUTING_AUTHOR_THRESHOLD],
            Author::from_row,
        )
    }

    /// The magazine with the most articles.
    ///
    /// Ties go to the lowest id. Returns `None` when no articles exist.
    pub fn top_publisher(conn: &Connection) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT m.id, m.name, m.category
             FROM magazines m
             JOIN articles ar ON ar.magazine_id = m.id
             GROUP BY m.id, m.name, m.category
             ORDER BY COUNT(ar.id) DESC, m.id ASC
             LIMIT 1",
            [],
            Self::from_row,
        )
    }

    /// Magazines with articles from more than one distinct author.
    pub fn magazines_with_multiple_authors(conn: &Connection) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT m.id, m.name, m.category
             FROM magazines m
             JOIN articles ar ON ar.magazine_id = m.id
             GROUP BY m.id, m.name, m.category
             HAVING COUNT(DISTINCT ar.author_id) > 1
             ORDER BY m.id",
            [],
            Self::from_row,
        )
    }

    /// Every magazine with its article count, zero included.
    pub fn article_count_by_magazine(conn: &Connection) -> Result<Vec<MagazineArticleCount>> {
        query_all(
            conn,
            "SELECT m.id, m.name, m.category, COUNT(ar.id)
             FROM magazines m
             LEFT JOIN articles ar ON ar.magazine_id = m.id
             GROUP BY m.id, m.name, m.category
             ORDER BY m.id",
            [],
            |row| {
                Ok(MagazineArticleCount {
                    magazine: Self::from_row(row)?,
                    article_count: row.get(3)?,
                })
            },
        )
    }
}

impl fmt::Display for Magazine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Magazine {}: {} ({})", self.id, self.name, self.category)
    }
}
