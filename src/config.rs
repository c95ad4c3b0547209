//! Configuration parsing for the `periodical` CLI.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for quick start

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default database file.
pub const DEFAULT_DATABASE: &str = "./articles.db";

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info,periodical=debug";

/// Periodical: query authors, magazines and articles in a SQLite database.
#[derive(Parser, Debug, Clone)]
#[command(name = "periodical")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Config {
    /// Path to the SQLite database file
    #[arg(short, long, env = "PERIODICAL_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Log filter directives (e.g. `info`, `warn,periodical=debug`)
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "PERIODICAL_LOG_JSON")]
    pub log_json: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the schema
    Setup {
        /// Remove an existing database file first
        #[arg(long)]
        fresh: bool,
        /// Load the fixture data after creating the schema
        #[arg(long)]
        seed: bool,
    },
    /// Replace all rows with the fixture data
    Seed,
    /// Summarize authors, magazines and article counts
    Report,
    /// Show an author and what they have written
    Author {
        /// Author id
        id: i64,
    },
    /// Show a magazine and who writes for it
    Magazine {
        /// Magazine id
        id: i64,
    },
    /// Create an author together with their articles
    AddAuthor {
        /// Author name
        name: String,
        /// Article as TITLE:MAGAZINE_ID (repeatable)
        #[arg(short, long = "article", value_name = "TITLE:MAGAZINE_ID")]
        articles: Vec<ArticleRef>,
    },
    /// Create a magazine together with its articles
    AddMagazine {
        /// Magazine name
        name: String,
        /// Magazine category
        category: String,
        /// Article as TITLE:AUTHOR_ID (repeatable)
        #[arg(short, long = "article", value_name = "TITLE:AUTHOR_ID")]
        articles: Vec<ArticleRef>,
    },
    /// Delete an author together with their articles
    DeleteAuthor {
        /// Author id
        id: i64,
    },
    /// Delete a magazine together with its articles
    DeleteMagazine {
        /// Magazine id
        id: i64,
    },
}

/// An article title paired with the id of its other parent, written
/// `TITLE:ID`. The title may itself contain colons; the last one splits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleRef {
    pub title: String,
    pub id: i64,
}

impl std::str::FromStr for ArticleRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (title, id) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected TITLE:ID, got {}", s))?;
        let id = id
            .trim()
            .parse()
            .map_err(|_| format!("invalid id in {}", s))?;
        Ok(Self {
            title: title.to_string(),
            id,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            log_level: DEFAULT_LOG_LEVEL.into(),
            log_json: false,
            output: OutputFormat::Text,
            command: Command::Report,
        }
    }
}
