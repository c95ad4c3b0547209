//! Article records.

use rusqlite::{params, Connection, Row};
use serde::Serialize;
use std::fmt;

use super::{count_rows, query_all, query_first, Author, Magazine};
use crate::error::{require_text, Result};

/// A piece written by one author for one magazine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub magazine_id: i64,
}

impl Article {
    pub fn new(id: i64, title: impl Into<String>, author_id: i64, magazine_id: i64) -> Self {
        Self {
            id,
            title: title.into(),
            author_id,
            magazine_id,
        }
    }

    /// Build from a row of `id, title, author_id, magazine_id`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self::new(
            row.get(0)?,
            row.get::<_, String>(1)?,
            row.get(2)?,
            row.get(3)?,
        ))
    }

    /// Insert a new article.
    ///
    /// # Errors
    ///
    /// [`crate::Error::ConstraintViolation`] if the title is blank or either
    /// parent does not exist.
    pub fn create(conn: &Connection, title: &str, author_id: i64, magazine_id: i64) -> Result<Self> {
        require_text("article", "title", title)?;
        conn.execute(
            "INSERT INTO articles (title, author_id, magazine_id) VALUES (?1, ?2, ?3)",
            params![title, author_id, magazine_id],
        )?;
        let article = Self::new(conn.last_insert_rowid(), title, author_id, magazine_id);
        tracing::debug!(
            article_id = article.id,
            author_id,
            magazine_id,
            "Inserted article"
        );
        Ok(article)
    }

    pub fn all(conn: &Connection) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, title, author_id, magazine_id FROM articles ORDER BY id",
            [],
            Self::from_row,
        )
    }

    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        query_first(
            conn,
            "SELECT id, title, author_id, magazine_id FROM articles WHERE id = ?1",
            params![id],
            Self::from_row,
        )
    }

    /// Every article with exactly this title.
    pub fn find_by_title(conn: &Connection, title: &str) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, title, author_id, magazine_id FROM articles WHERE title = ?1 ORDER BY id",
            params![title],
            Self::from_row,
        )
    }

    pub fn find_by_author_id(conn: &Connection, author_id: i64) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, title, author_id, magazine_id FROM articles WHERE author_id = ?1 ORDER BY id",
            params![author_id],
            Self::from_row,
        )
    }

    pub fn find_by_magazine_id(conn: &Connection, magazine_id: i64) -> Result<Vec<Self>> {
        query_all(
            conn,
            "SELECT id, title, author_id, magazine_id FROM articles WHERE magazine_id = ?1 ORDER BY id",
            params![magazine_id],
            Self::from_row,
        )
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        count_rows(conn, "SELECT COUNT(*) FROM articles")
    }

    /// The owning author, or `None` if `author_id` no longer resolves.
    pub fn author(&self, conn: &Connection) -> Result<Option<Author>> {
        Author::find_by_id(conn, self.author_id)
    }

    /// The owning magazine, or `None` if `magazine_id` no longer resolves.
    pub fn magazine(&self, conn: &Connection) -> Result<Option<Magazine>> {
        Magazine::find_by_id(conn, self.magazine_id)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Article {}: {}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seeded_database;

    #[test]
    fn test_find_by_id() {
        let db = seeded_database();
        assert_eq!(
            Article::find_by_id(&db, 1).unwrap(),
            Some(Article::new(1, "The Future of AI", 1, 1))
        );
        assert!(Article::find_by_id(&db, 16).unwrap().is_none());
    }

    #[test]
    fn test_find_by_title_returns_all_matches() {
        let db = seeded_database();
        Article::create(&db, "The Future of AI", 5, 2).unwrap();

        let found = Article::find_by_title(&db, "The Future of AI").unwrap();
        let authors: Vec<i64> = found.iter().map(|a| a.author_id).collect();
        assert_eq!(authors, vec![1, 5]);
        assert!(Article::find_by_title(&db, "Unwritten").unwrap().is_empty());
    }

    #[test]
    fn test_find_by_parent_ids() {
        let db = seeded_database();

        let by_author: Vec<i64> = Article::find_by_author_id(&db, 4)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(by_author, vec![5, 10, 15]);

        let by_magazine: Vec<i64> = Article::find_by_magazine_id(&db, 2)
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(by_magazine, vec![3, 11]);

        assert!(Article::find_by_author_id(&db, 42).unwrap().is_empty());
    }

    #[test]
    fn test_every_article_resolves_its_parents() {
        let db = seeded_database();

        for article in Article::all(&db).unwrap() {
            let author = article.author(&db).unwrap().unwrap();
            let magazine = article.magazine(&db).unwrap().unwrap();
            assert_eq!(author.id, article.author_id);
            assert_eq!(magazine.id, article.magazine_id);
        }
    }

    #[test]
    fn test_dangling_parent_is_none() {
        let db = seeded_database();
        let article = Article::new(99, "Detached", 404, 404);

        assert!(article.author(&db).unwrap().is_none());
        assert!(article.magazine(&db).unwrap().is_none());
    }

    #[test]
    fn test_create_with_unknown_magazine_is_constraint_violation() {
        let db = seeded_database();

        let err = Article::create(&db, "Lost", 1, 404).unwrap_err();
        assert!(err.is_constraint_violation(), "got {err:?}");
        assert_eq!(Article::count(&db).unwrap(), 15);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let db = seeded_database();
        assert!(Article::create(&db, "\t", 1, 1).unwrap_err().is_constraint_violation());
    }
}
