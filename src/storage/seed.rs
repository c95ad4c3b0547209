//! Fixture data for demos and tests.
//!
//! Five authors, five magazines and fifteen articles. Tables are emptied
//! first, so ids always come out as 1..=5 and 1..=15.

use rusqlite::{params, Connection};

use crate::error::Result;

/// Author names, in id order.
pub const AUTHORS: &[&str] = &[
    "John Smith",
    "Jane Doe",
    "Michael Johnson",
    "Sarah Williams",
    "Robert Brown",
];

/// Magazine `(name, category)` pairs, in id order.
pub const MAGAZINES: &[(&str, &str)] = &[
    ("Tech Today", "Technology"),
    ("Science Weekly", "Science"),
    ("Business Review", "Business"),
    ("Health & Fitness", "Health"),
    ("Travel Explorer", "Travel"),
];

/// Article `(title, author_id, magazine_id)` triples, in id order.
pub const ARTICLES: &[(&str, i64, i64)] = &[
    ("The Future of AI", 1, 1),
    ("Machine Learning Trends", 1, 1),
    ("Climate Change Research", 2, 2),
    ("Investment Strategies", 3, 3),
    ("Healthy Diet Tips", 4, 4),
    ("European Destinations", 5, 5),
    ("Cloud Computing", 1, 1),
    ("Remote Work", 2, 3),
    ("Exercise Routines", 3, 4),
    ("Asia Travel Guide", 4, 5),
    ("Quantum Computing", 5, 2),
    ("Mobile App Development", 1, 1),
    ("Startup Funding", 2, 3),
    ("Mental Health", 3, 4),
    ("American Road Trips", 4, 5),
];

/// Replace the contents of all three tables with the fixture.
///
/// Runs in one transaction; on error nothing changes.
pub fn seed_database(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    // Children first so foreign keys never dangle mid-transaction.
    tx.execute("DELETE FROM articles", [])?;
    tx.execute("DELETE FROM authors", [])?;
    tx.execute("DELETE FROM magazines", [])?;

    {
        let mut stmt = tx.prepare("INSERT INTO authors (name) VALUES (?1)")?;
        for name in AUTHORS {
            stmt.execute(params![name])?;
        }

        let mut stmt = tx.prepare("INSERT INTO magazines (name, category) VALUES (?1, ?2)")?;
        for (name, category) in MAGAZINES {
            stmt.execute(params![name, category])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO articles (title, author_id, magazine_id) VALUES (?1, ?2, ?3)",
        )?;
        for (title, author_id, magazine_id) in ARTICLES {
            stmt.execute(params![title, author_id, magazine_id])?;
        }
    }

    tx.commit()?;

    tracing::info!(
        authors = AUTHORS.len(),
        magazines = MAGAZINES.len(),
        articles = ARTICLES.len(),
        "Database seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_seed_twice_keeps_fixture_ids() {
        let mut db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        seed_database(&mut db).unwrap();
        seed_database(&mut db).unwrap();

        assert_eq!(count(&db, "authors"), 5);
        assert_eq!(count(&db, "magazines"), 5);
        assert_eq!(count(&db, "articles"), 15);

        let max_id: i64 = db
            .query_row("SELECT MAX(id) FROM articles", [], |row| row.get(0))
            .unwrap();
        assert_eq!(max_id, 15);
    }

    #[test]
    fn test_seed_without_schema_fails() {
        let mut db = Database::open_in_memory().unwrap();
        assert!(seed_database(&mut db).is_err());
    }
}
