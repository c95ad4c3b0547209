//! Subcommand implementations.

use anyhow::{ensure, Context, Result};
use periodical::config::{ArticleRef, OutputFormat};
use periodical::storage::seed::seed_database;
use periodical::{
    add_author_with_articles, add_magazine_with_articles, delete_author_with_articles,
    delete_magazine_with_articles, Article, Author, AuthorArticle, Database, Deleted, Magazine,
    MagazineArticle, MagazineArticleCount,
};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct Report {
    authors: Vec<Author>,
    magazines: Vec<MagazineArticleCount>,
    total_articles: i64,
    most_prolific: Option<Author>,
    top_publisher: Option<Magazine>,
    magazines_with_multiple_authors: Vec<Magazine>,
}

#[derive(Serialize)]
struct AuthorDetail {
    author: Author,
    articles: Vec<Article>,
    magazines: Vec<Magazine>,
    topic_areas: Vec<String>,
}

#[derive(Serialize)]
struct MagazineDetail {
    magazine: Magazine,
    articles: Vec<Article>,
    contributors: Vec<Author>,
    contributing_authors: Vec<Author>,
}

#[derive(Serialize)]
struct DeleteOutput {
    kind: &'static str,
    id: i64,
    deleted: bool,
    articles: usize,
}

/// Open an existing database; every command but `setup` needs one.
fn open_existing(path: &Path) -> Result<Database> {
    ensure!(
        path.exists(),
        "database {} does not exist, run `periodical setup` first",
        path.display()
    );
    Database::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn setup(path: &Path, fresh: bool, seed: bool) -> Result<()> {
    if fresh && path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
        tracing::info!(path = %path.display(), "Removed existing database");
    }

    let mut db =
        Database::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    db.initialize().context("failed to create schema")?;
    if seed {
        seed_database(&mut db).context("failed to seed database")?;
    }
    db.close()?;

    println!("Database ready at {}", path.display());
    Ok(())
}

pub fn seed(path: &Path) -> Result<()> {
    let mut db = open_existing(path)?;
    seed_database(&mut db).context("failed to seed database")?;
    println!(
        "Seeded {} author(s), {} magazine(s), {} article(s)",
        Author::count(&db)?,
        Magazine::count(&db)?,
        Article::count(&db)?
    );
    Ok(())
}

pub fn report(path: &Path, format: OutputFormat) -> Result<()> {
    let db = open_existing(path)?;

    let report = Report {
        authors: Author::all(&db)?,
        magazines: Magazine::article_count_by_magazine(&db)?,
        total_articles: Article::count(&db)?,
        most_prolific: Author::most_prolific(&db)?,
        top_publisher: Magazine::top_publisher(&db)?,
        magazines_with_multiple_authors: Magazine::magazines_with_multiple_authors(&db)?,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!("{:<6} {:<30}", "ID", "AUTHOR");
            println!("{}", "-".repeat(37));
            for author in &report.authors {
                println!("{:<6} {:<30}", author.id, author.name);
            }
            println!();

            println!("{:<6} {:<30} {:<15} {:>8}", "ID", "MAGAZINE", "CATEGORY", "ARTICLES");
            println!("{}", "-".repeat(62));
            for entry in &report.magazines {
                println!(
                    "{:<6} {:<30} {:<15} {:>8}",
                    entry.magazine.id,
                    entry.magazine.name,
                    entry.magazine.category,
                    entry.article_count
                );
            }
            println!();

            println!("Total: {} article(s)", report.total_articles);
            match &report.most_prolific {
                Some(author) => println!("Most prolific author: {}", author.name),
                None => println!("Most prolific author: -"),
            }
            match &report.top_publisher {
                Some(magazine) => println!("Top publisher: {}", magazine.name),
                None => println!("Top publisher: -"),
            }
            let names: Vec<&str> = report
                .magazines_with_multiple_authors
                .iter()
                .map(|m| m.name.as_str())
                .collect();
            println!("Magazines with multiple authors: {}", names.join(", "));
        }
    }

    Ok(())
}

pub fn show_author(path: &Path, id: i64, format: OutputFormat) -> Result<()> {
    let db = open_existing(path)?;
    let Some(author) = Author::find_by_id(&db, id)? else {
        println!("No author with id {id}.");
        return Ok(());
    };

    let detail = AuthorDetail {
        articles: author.articles(&db)?,
        magazines: author.magazines(&db)?,
        topic_areas: author.topic_areas(&db)?,
        author,
    };

    match format {
        OutputFormat::Json => print_json(&detail)?,
        OutputFormat::Text => {
            println!("{}", detail.author);
            println!("\nArticles ({}):", detail.articles.len());
            for article in &detail.articles {
                println!("- {}", article.title);
            }
            println!("\nMagazines ({}):", detail.magazines.len());
            for magazine in &detail.magazines {
                println!("- {} ({})", magazine.name, magazine.category);
            }
            println!("\nTopic areas: {}", detail.topic_areas.join(", "));
        }
    }

    Ok(())
}

pub fn show_magazine(path: &Path, id: i64, format: OutputFormat) -> Result<()> {
    let db = open_existing(path)?;
    let Some(magazine) = Magazine::find_by_id(&db, id)? else {
        println!("No magazine with id {id}.");
        return Ok(());
    };

    let detail = MagazineDetail {
        articles: magazine.articles(&db)?,
        contributors: magazine.contributors(&db)?,
        contributing_authors: magazine.contributing_authors(&db)?,
        magazine,
    };

    match format {
        OutputFormat::Json => print_json(&detail)?,
        OutputFormat::Text => {
            println!("{}", detail.magazine);
            println!("\nArticles ({}):", detail.articles.len());
            for article in &detail.articles {
                println!("- {}", article.title);
            }
            println!("\nContributors ({}):", detail.contributors.len());
            for author in &detail.contributors {
                println!("- {}", author.name);
            }
            println!(
                "\nAuthors with more than 2 articles ({}):",
                detail.contributing_authors.len()
            );
            for author in &detail.contributing_authors {
                println!("- {}", author.name);
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct Created<T: Serialize> {
    #[serde(flatten)]
    record: T,
    articles: Vec<Article>,
}

pub fn add_author(
    path: &Path,
    name: &str,
    articles: &[ArticleRef],
    format: OutputFormat,
) -> Result<()> {
    let mut db = open_existing(path)?;
    let entries: Vec<AuthorArticle> = articles
        .iter()
        .map(|a| AuthorArticle::new(a.title.clone(), a.id))
        .collect();

    let author = add_author_with_articles(&mut db, name, &entries)
        .with_context(|| format!("failed to add author {name}"))?;
    let created = Created {
        articles: author.articles(&db)?,
        record: author,
    };

    match format {
        OutputFormat::Json => print_json(&created)?,
        OutputFormat::Text => {
            println!("Added {} with {} article(s).", created.record, created.articles.len());
            for article in &created.articles {
                println!("- {}", article.title);
            }
        }
    }
    Ok(())
}

pub fn add_magazine(
    path: &Path,
    name: &str,
    category: &str,
    articles: &[ArticleRef],
    format: OutputFormat,
) -> Result<()> {
    let mut db = open_existing(path)?;
    let entries: Vec<MagazineArticle> = articles
        .iter()
        .map(|a| MagazineArticle::new(a.title.clone(), a.id))
        .collect();

    let magazine = add_magazine_with_articles(&mut db, name, category, &entries)
        .with_context(|| format!("failed to add magazine {name}"))?;
    let created = Created {
        articles: magazine.articles(&db)?,
        record: magazine,
    };

    match format {
        OutputFormat::Json => print_json(&created)?,
        OutputFormat::Text => {
            println!("Added {} with {} article(s).", created.record, created.articles.len());
            for article in &created.articles {
                println!("- {}", article.title);
            }
        }
    }
    Ok(())
}

pub fn delete_author(path: &Path, id: i64, format: OutputFormat) -> Result<()> {
    let mut db = open_existing(path)?;
    let deleted = delete_author_with_articles(&mut db, id)
        .with_context(|| format!("failed to delete author {id}"))?;
    print_deleted("author", id, deleted, format)
}

pub fn delete_magazine(path: &Path, id: i64, format: OutputFormat) -> Result<()> {
    let mut db = open_existing(path)?;
    let deleted = delete_magazine_with_articles(&mut db, id)
        .with_context(|| format!("failed to delete magazine {id}"))?;
    print_deleted("magazine", id, deleted, format)
}

fn print_deleted(kind: &'static str, id: i64, deleted: Deleted, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&DeleteOutput {
            kind,
            id,
            deleted: deleted.parent,
            articles: deleted.articles,
        }),
        OutputFormat::Text => {
            if deleted.is_nothing() {
                println!("Nothing deleted: no {kind} with id {id}.");
            } else {
                println!(
                    "Deleted {kind} {id} and {} article(s).",
                    deleted.articles
                );
            }
            Ok(())
        }
    }
}
