//! CLI administration tool for shortlink.
//!
//! Provides commands for registering users, inspecting links, viewing
//! statistics, and performing database checks without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a user
//! cargo run --bin admin -- user create --email alice@example.com
//!
//! # List a user's links
//! cargo run --bin admin -- user links 1
//!
//! # Inspect a link
//! cargo run --bin admin -- link info abc123
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): used to print full short URLs

use shortlink::application::services::UserService;
use shortlink::domain::errors::{ShortenError, StoreError};
use shortlink::domain::store::Store;
use shortlink::infrastructure::persistence::PgStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use validator::ValidateEmail;

/// CLI tool for managing shortlink.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List a user's links, newest first
    Links {
        /// User ID
        id: i64,
    },
}

/// Link inspection subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a link and its click count
    Info {
        /// Short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let store = Arc::new(PgStore::new(Arc::new(pool.clone())));
    let base_url = std::env::var("BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string();

    let outcome = match cli.command {
        Commands::User { action } => handle_user_action(action, store.clone(), &base_url).await,
        Commands::Link { action } => handle_link_action(action, store.clone(), &base_url).await,
        Commands::Stats => handle_stats(&pool).await,
        Commands::Db { action } => handle_db_action(action, store.as_ref()).await,
    };

    store.close().await;
    outcome
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, store: Arc<PgStore>, base_url: &str) -> Result<()> {
    let service = UserService::new(store);

    match action {
        UserAction::Create { email, yes } => create_user(&service, email, yes).await,
        UserAction::Links { id } => list_user_links(&service, id, base_url).await,
    }
}

/// Registers a user with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for email (or use provided)
/// 2. Check email syntax
/// 3. Confirm creation (unless `--yes` flag)
/// 4. Store in database
async fn create_user(
    service: &UserService<PgStore>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let email = check_email(&email)?;

    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.create_user(&email).await {
        Ok(user) => {
            println!("{}", "✅ User created successfully!".green().bold());
            println!("  ID: {}", user.id.to_string().bright_yellow().bold());
            println!();
            Ok(())
        }
        Err(ShortenError::EmailExists) => {
            println!("{}", "⚠️  A user with this email already exists".yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create user: {e}")),
    }
}

/// Trims `email` and checks its syntax.
fn check_email(email: &str) -> Result<String> {
    let email = email.trim();

    if !email.validate_email() {
        anyhow::bail!("Invalid email address: '{email}'");
    }

    Ok(email.to_string())
}

/// Lists a user's links.
///
/// # Output Format
///
/// ```text
/// 🔗 Links for user 1
///
///   Code       Clicks   Created              URL
///   ──────────────────────────────────────────────────────────────
///   abc123     42       2024-01-15 10:30     https://example.com/page
/// ```
async fn list_user_links(service: &UserService<PgStore>, user_id: i64, base_url: &str) -> Result<()> {
    println!(
        "{}",
        format!("🔗 Links for user {user_id}").bright_blue().bold()
    );
    println!();

    let links = match service.get_user_links(user_id).await {
        Ok(links) => links,
        Err(ShortenError::UserNotFound) => {
            println!("{}", "  User not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to list links: {e}")),
    };

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<20} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<8} {:<20} {}",
            link.short_code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        links.len().to_string().bright_white().bold()
    );
    println!("  Short URLs are served from {}", base_url.bright_cyan());
    println!();

    Ok(())
}

/// Dispatches link inspection commands.
async fn handle_link_action(action: LinkAction, store: Arc<PgStore>, base_url: &str) -> Result<()> {
    match action {
        LinkAction::Info { code } => {
            println!("{}", "ℹ️  Link Information".bright_blue().bold());
            println!();

            let link = match store.get_by_short_code(&code).await {
                Ok(link) => link,
                Err(StoreError::NotFound) => {
                    println!("{}", "  Link not found".yellow());
                    return Ok(());
                }
                Err(e) => return Err(anyhow::anyhow!("Database error: {e}")),
            };

            println!("  Code:      {}", link.short_code.cyan());
            println!(
                "  Short URL: {}",
                format!("{base_url}/{}", link.short_code).bright_cyan()
            );
            println!("  Target:    {}", link.original_url);
            println!("  Owner:     {}", link.user_id.to_string().bright_black());
            println!(
                "  Clicks:    {}",
                link.clicks.to_string().bright_green().bold()
            );
            println!(
                "  Created:   {}",
                link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
            );
            println!();
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of users
/// - Total number of links
/// - Total number of clicks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users:  {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, store: &PgStore) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            store
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {e}"))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_email() {
        assert_eq!(check_email(" ann@example.com ").unwrap(), "ann@example.com");
        assert!(check_email("not-an-email").is_err());
        assert!(check_email("").is_err());
    }
}
