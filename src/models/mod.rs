//! Record types and their queries.
//!
//! Each record is built from a row by an explicit `from_row` constructor.
//! Relationship traversal is lazy: calling `author.articles(conn)` issues a
//! query every time, nothing is cached on the record.

mod article;
mod author;
mod magazine;

pub use article::Article;
pub use author::Author;
pub use magazine::{Magazine, MagazineArticleCount};

use rusqlite::{Connection, OptionalExtension, Params, Row};

use crate::error::Result;

/// Run `sql` and map every row.
fn query_all<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Run `sql` and map the first row, if there is one.
fn query_first<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Option<T>>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare_cached(sql)?;
    Ok(stmt.query_row(params, map).optional()?)
}

/// `SELECT COUNT(*)` helper for a whole table.
fn count_rows(conn: &Connection, sql: &str) -> Result<i64> {
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}
