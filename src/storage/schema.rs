//! Schema and connection pragmas.
//!
//! `articles` references both parents with foreign keys and no cascade
//! action; removing a parent together with its articles goes through the
//! delete helpers in [`crate::transactions`].

use rusqlite::Connection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS magazines (
    id       INTEGER PRIMARY KEY,
    name     TEXT NOT NULL,
    category TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS articles (
    id          INTEGER PRIMARY KEY,
    title       TEXT NOT NULL,
    author_id   INTEGER NOT NULL REFERENCES authors(id),
    magazine_id INTEGER NOT NULL REFERENCES magazines(id)
);

CREATE INDEX IF NOT EXISTS idx_articles_author_id ON articles(author_id);
CREATE INDEX IF NOT EXISTS idx_articles_magazine_id ON articles(magazine_id);
"#;

/// Apply per-connection pragmas.
///
/// SQLite leaves foreign key enforcement off by default and the setting is
/// not persisted, so it must be enabled on every connection.
pub fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
}

/// Create tables and indexes if they do not exist.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        apply_pragmas(&conn).unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_article_requires_existing_author() {
        let conn = setup();
        conn.execute(
            "INSERT INTO magazines (name, category) VALUES ('Tech Today', 'Technology')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO articles (title, author_id, magazine_id) VALUES ('Orphan', 42, 1)",
            [],
        );
        assert!(result.is_err(), "dangling author_id should be rejected");
    }

    #[test]
    fn test_referenced_parent_cannot_be_deleted_directly() {
        let conn = setup();
        conn.execute_batch(
            "INSERT INTO authors (name) VALUES ('Jane Doe');
             INSERT INTO magazines (name, category) VALUES ('Science Weekly', 'Science');
             INSERT INTO articles (title, author_id, magazine_id) VALUES ('Climate', 1, 1);",
        )
        .unwrap();

        assert!(conn.execute("DELETE FROM authors WHERE id = 1", []).is_err());
    }
}
