//! CLI administration tool for the library service.
//!
//! Provides statistics and database maintenance without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Outstanding loans and books per category
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Delete every book, user and loan record
//! cargo run --bin admin -- db purge
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use library_app::domain::entities::BookCategory;
use library_app::state::{AppState, Repositories};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the library service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show loan and catalog statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Delete all books, users and loan history
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays outstanding loans and the number of books in each category.
///
/// # Output Format
///
/// ```text
/// Statistics
///
///   Books on loan: 3
///
///   Category     Books
///   ──────────────────
///   COMPUTER     2
///   SCIENCE      1
/// ```
async fn handle_stats(pool: &PgPool) -> Result<()> {
    let state = AppState::new(
        Repositories::postgres(Arc::new(pool.clone())),
        Default::default(),
    );

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let on_loan = state
        .loan_service
        .count_loaned_books()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count loans: {}", e))?;

    let per_category = state
        .loan_service
        .book_statistics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count books: {}", e))?;

    println!(
        "  Books on loan: {}",
        on_loan.to_string().bright_green().bold()
    );
    println!();

    if per_category.is_empty() {
        println!("{}", "  No categorized books".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<12} {}",
        "Category".bright_white().bold(),
        "Books".bright_white().bold()
    );
    println!("  {}", "─".repeat(18).bright_black());

    for item in &per_category {
        println!(
            "  {:<12} {}",
            item.category.as_str().cyan(),
            item.count.to_string().bright_green()
        );
    }

    let missing: Vec<&str> = BookCategory::ALL
        .iter()
        .filter(|c| !per_category.iter().any(|item| item.category == **c))
        .map(|c| c.as_str())
        .collect();

    if !missing.is_empty() {
        println!();
        println!("  Empty: {}", missing.join(", ").bright_black());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic and maintenance commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Purge { yes } => purge(pool, yes).await?,
    }

    Ok(())
}

/// Deletes every user (with its loan history) and every book.
///
/// Requires confirmation (default: No) unless `--yes` is given.
async fn purge(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Purge library data".bright_blue().bold());
    println!();

    let repositories = Repositories::postgres(Arc::new(pool.clone()));

    let users = repositories
        .users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;
    let books = repositories
        .books
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list books: {}", e))?;

    println!("  Users: {}", users.len().to_string().cyan());
    println!("  Books: {}", books.len().to_string().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all of the above, including loan history?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mut loans_removed = 0;
    for user in &users {
        loans_removed += repositories
            .users
            .delete_with_loan_history(user.id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete user {}: {}", user.id, e))?;
    }

    let books_removed = repositories
        .books
        .delete_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete books: {}", e))?;

    println!();
    println!("{}", "✅ Purge complete".green().bold());
    println!("  Users removed:        {}", users.len());
    println!("  Loan records removed: {}", loans_removed);
    println!("  Books removed:        {}", books_removed);
    println!();

    Ok(())
}
