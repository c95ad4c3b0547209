//! periodical: command-line front end for the Periodical data-access layer.
//!
//! # Usage
//!
//! ```bash
//! periodical --database ./articles.db setup --fresh --seed
//! periodical report
//! periodical --output json author 1
//! periodical add-author "Jane Roe" --article "Cloud Costs:1" --article "Lab Notes:2"
//! ```
//!
//! Environment variables can also be used:
//! - `PERIODICAL_DATABASE`: Path to the SQLite database file
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

mod commands;

use anyhow::Result;
use periodical::config::{Command, Config};
use periodical::observability::tracing::init_tracing;

fn main() -> Result<()> {
    let config = Config::parse_args();

    init_tracing(&config.log_level, config.log_json);

    let format = config.output;
    let path = config.database.as_path();

    match config.command {
        Command::Setup { fresh, seed } => commands::setup(path, fresh, seed),
        Command::Seed => commands::seed(path),
        Command::Report => commands::report(path, format),
        Command::Author { id } => commands::show_author(path, id, format),
        Command::Magazine { id } => commands::show_magazine(path, id, format),
        Command::AddAuthor { name, articles } => {
            commands::add_author(path, &name, &articles, format)
        }
        Command::AddMagazine {
            name,
            category,
            articles,
        } => commands::add_magazine(path, &name, &category, &articles, format),
        Command::DeleteAuthor { id } => commands::delete_author(path, id, format),
        Command::DeleteMagazine { id } => commands::delete_magazine(path, id, format),
    }
}
