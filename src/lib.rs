//! Periodical: a SQLite data-access layer for authors, magazines and articles.
//!
//! Records are plain structs mapped from rows through explicit constructors.
//! Every query takes the connection as an argument, so the same finders work
//! against a [`storage::Database`] or inside a transaction.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`error`]: Crate-wide error type
//! - [`models`]: Author, Magazine and Article records and their queries
//! - [`observability`]: Tracing setup
//! - [`storage`]: Connection handle, schema and fixture seeding
//! - [`transactions`]: All-or-nothing composite inserts and deletes

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // models::author::Author is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::needless_raw_string_hashes  // r#""# is fine for SQL
)]

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod storage;
pub mod transactions;

pub use error::{Error, Result};
pub use models::{Article, Author, Magazine, MagazineArticleCount};
pub use storage::Database;
pub use transactions::{
    add_author_with_articles, add_magazine_with_articles, delete_author_with_articles,
    delete_magazine_with_articles, AuthorArticle, Deleted, MagazineArticle,
};
