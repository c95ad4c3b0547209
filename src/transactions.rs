//! All-or-nothing composite writes.
//!
//! Each helper opens one SQLite transaction, commits on success and rolls
//! back explicitly on every error path. Callers see either the whole change
//! or none of it.

use rusqlite::{params, Connection, Transaction};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::{Article, Author, Magazine};

/// An article to create alongside a new author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorArticle {
    pub title: String,
    pub magazine_id: i64,
}

impl AuthorArticle {
    pub fn new(title: impl Into<String>, magazine_id: i64) -> Self {
        Self {
            title: title.into(),
            magazine_id,
        }
    }
}

/// An article to create alongside a new magazine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagazineArticle {
    pub title: String,
    pub author_id: i64,
}

impl MagazineArticle {
    pub fn new(title: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            author_id,
        }
    }
}

/// Outcome of a composite delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deleted {
    /// Whether the parent row existed and was removed.
    pub parent: bool,
    /// Number of dependent article rows removed.
    pub articles: usize,
}

impl Deleted {
    /// True when the id matched nothing.
    pub fn is_nothing(&self) -> bool {
        !self.parent && self.articles == 0
    }
}

/// Run `op` inside a transaction, committing on `Ok` and rolling back on `Err`.
fn run_in_transaction<T, F>(conn: &mut Connection, operation: &'static str, op: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> Result<T>,
{
    let path = PathBuf::from(conn.path().unwrap_or(":memory:"));
    let tx = conn
        .transaction()
        .map_err(|err| Error::at_path(&path, err))?;
    match op(&tx) {
        Ok(value) => {
            tx.commit().map_err(|err| Error::at_path(&path, err))?;
            tracing::info!(operation, "Transaction committed");
            Ok(value)
        }
        Err(err) => {
            let err = err.with_path(&path);
            match tx.rollback() {
                Ok(()) => tracing::warn!(operation, error = %err, "Transaction rolled back"),
                Err(rollback_err) => tracing::error!(
                    operation,
                    error = %err,
                    rollback_error = %rollback_err,
                    "Rollback failed"
                ),
            }
            Err(err)
        }
    }
}

/// Create an author and all of `articles` in one transaction.
///
/// # Errors
///
/// Returns [`crate::Error::ConstraintViolation`] if the name or any title is
/// blank or a magazine id does not exist. Nothing is persisted in that case.
pub fn add_author_with_articles(
    conn: &mut Connection,
    name: &str,
    articles: &[AuthorArticle],
) -> Result<Author> {
    run_in_transaction(conn, "add_author_with_articles", |tx| {
        let author = Author::create(tx, name)?;
        for entry in articles {
            Article::create(tx, &entry.title, author.id, entry.magazine_id)?;
        }
        tracing::debug!(author_id = author.id, articles = articles.len(), "Author staged");
        Ok(author)
    })
}

/// Create a magazine and all of `articles` in one transaction.
///
/// # Errors
///
/// Returns [`crate::Error::ConstraintViolation`] if a required field is blank
/// or an author id does not exist. Nothing is persisted in that case.
pub fn add_magazine_with_articles(
    conn: &mut Connection,
    name: &str,
    category: &str,
    articles: &[MagazineArticle],
) -> Result<Magazine> {
    run_in_transaction(conn, "add_magazine_with_articles", |tx| {
        let magazine = Magazine::create(tx, name, category)?;
        for entry in articles {
            Article::create(tx, &entry.title, entry.author_id, magazine.id)?;
        }
        tracing::debug!(
            magazine_id = magazine.id,
            articles = articles.len(),
            "Magazine staged"
        );
        Ok(magazine)
    })
}

/// Delete an author and every article they wrote.
///
/// An unknown id is not an error; the result reports that nothing was deleted.
pub fn delete_author_with_articles(conn: &mut Connection, author_id: i64) -> Result<Deleted> {
    run_in_transaction(conn, "delete_author_with_articles", |tx| {
        let articles = tx.execute("DELETE FROM articles WHERE author_id = ?1", params![author_id])?;
        let parent = tx.execute("DELETE FROM authors WHERE id = ?1", params![author_id])? > 0;
        tracing::debug!(author_id, parent, articles, "Author deleted");
        Ok(Deleted { parent, articles })
    })
}

/// Delete a magazine and every article it published.
///
/// An unknown id is not an error; the result reports that nothing was deleted.
pub fn delete_magazine_with_articles(conn: &mut Connection, magazine_id: i64) -> Result<Deleted> {
    run_in_transaction(conn, "delete_magazine_with_articles", |tx| {
        let articles = tx.execute(
            "DELETE FROM articles WHERE magazine_id = ?1",
            params![magazine_id],
        )?;
        let parent = tx.execute("DELETE FROM magazines WHERE id = ?1", params![magazine_id])? > 0;
        tracing::debug!(magazine_id, parent, articles, "Magazine deleted");
        Ok(Deleted { parent, articles })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seeded_database;

    #[test]
    fn test_add_author_with_articles_commits() {
        let mut db = seeded_database();
        let entries = [
            AuthorArticle::new("Transaction Example 1", 1),
            AuthorArticle::new("Transaction Example 2", 2),
        ];

        let author = add_author_with_articles(&mut db, "Transaction Author", &entries).unwrap();

        assert_eq!(author.id, 6);
        let titles: Vec<String> = author
            .articles(&db)
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Transaction Example 1", "Transaction Example 2"]);
    }

    #[test]
    fn test_add_author_rolls_back_after_partial_progress() {
        let mut db = seeded_database();
        let entries = [
            AuthorArticle::new("Valid First", 1),
            AuthorArticle::new("Bad Reference", 999),
        ];

        let err = add_author_with_articles(&mut db, "X", &entries).unwrap_err();

        assert!(matches!(err, Error::ConstraintViolation(_)), "got {err:?}");
        assert_eq!(Author::count(&db).unwrap(), 5);
        assert_eq!(Article::count(&db).unwrap(), 15);
        assert!(Author::find_by_name(&db, "X").unwrap().is_none());
        assert!(Article::find_by_title(&db, "Valid First").unwrap().is_empty());
    }

    #[test]
    fn test_add_author_blank_title_rolls_back() {
        let mut db = seeded_database();
        let entries = [AuthorArticle::new("", 1)];

        assert!(add_author_with_articles(&mut db, "Y", &entries).is_err());
        assert_eq!(Author::count(&db).unwrap(), 5);
    }

    #[test]
    fn test_add_magazine_with_articles() {
        let mut db = seeded_database();
        let entries = [
            MagazineArticle::new("Magazine Transaction 1", 1),
            MagazineArticle::new("Magazine Transaction 2", 2),
        ];

        let magazine =
            add_magazine_with_articles(&mut db, "Transaction Magazine", "Transaction", &entries)
                .unwrap();

        assert_eq!(magazine.articles(&db).unwrap().len(), 2);
        assert_eq!(magazine.contributors(&db).unwrap().len(), 2);
    }

    #[test]
    fn test_add_magazine_with_unknown_author_rolls_back() {
        let mut db = seeded_database();
        let entries = [MagazineArticle::new("Ghost Writer", 404)];

        let err = add_magazine_with_articles(&mut db, "Phantom", "Mystery", &entries).unwrap_err();

        assert!(err.is_constraint_violation());
        assert!(Magazine::find_by_name(&db, "Phantom").unwrap().is_none());
        assert_eq!(Magazine::count(&db).unwrap(), 5);
    }

    #[test]
    fn test_delete_author_with_articles() {
        let mut db = seeded_database();

        let deleted = delete_author_with_articles(&mut db, 1).unwrap();

        assert_eq!(deleted, Deleted { parent: true, articles: 4 });
        assert!(Author::find_by_id(&db, 1).unwrap().is_none());
        assert!(Article::find_by_author_id(&db, 1).unwrap().is_empty());
        assert_eq!(Article::count(&db).unwrap(), 11);
    }

    #[test]
    fn test_delete_unknown_ids_is_noop() {
        let mut db = seeded_database();

        assert!(delete_author_with_articles(&mut db, 77).unwrap().is_nothing());
        assert!(delete_magazine_with_articles(&mut db, 77).unwrap().is_nothing());
        assert_eq!(Article::count(&db).unwrap(), 15);
    }

    #[test]
    fn test_delete_author_without_articles() {
        let mut db = seeded_database();
        let author = Author::create(&db, "Newcomer").unwrap();

        let deleted = delete_author_with_articles(&mut db, author.id).unwrap();
        assert_eq!(deleted, Deleted { parent: true, articles: 0 });
    }
}
