//! CLI administration tool for linkreg.
//!
//! Creates links and inspects statistics directly against the database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link (prompts for the URL when omitted)
//! cargo run --bin linkreg-admin -- create https://example.com --validity 60 --code promo
//!
//! # Show statistics for a link
//! cargo run --bin linkreg-admin -- stats promo
//!
//! # Check database connection
//! cargo run --bin linkreg-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `BASE_URL`,
//! `DEFAULT_VALIDITY_MINUTES`. The in-memory backend is not supported here.

use linkreg::api::dto::format_timestamp;
use linkreg::application::services::{LinkService, StatsService};
use linkreg::config::{self, Config, StorageBackend};
use linkreg::domain::clock::SystemClock;
use linkreg::infrastructure::cache::NullCache;
use linkreg::infrastructure::geoip::NullGeoLocator;
use linkreg::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};
use linkreg::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkreg.
#[derive(Parser)]
#[command(name = "linkreg-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Validity in minutes
        #[arg(short, long)]
        validity: Option<f64>,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show click statistics for a short code
    Stats {
        /// Short code to inspect
        code: String,
    },

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

    /// Show database info and totals
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("linkreg-admin requires STORAGE_BACKEND=postgres");
    }

    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::Create {
            url,
            validity,
            code,
        } => create_link(&config, &pool, url, validity, code).await?,
        Commands::Stats { code } => show_stats(&pool, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Creates a link through the same service the HTTP API uses.
async fn create_link(
    config: &Config,
    pool: &PgPool,
    url: Option<String>,
    validity: Option<f64>,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("URL to shorten").interact_text()?,
    };

    let pool = Arc::new(pool.clone());
    let service = LinkService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgStatsRepository::new(pool)),
        Arc::new(NullCache::new()),
        Arc::new(NullGeoLocator),
        Arc::new(SystemClock),
        config.default_validity_minutes,
    );

    let link = service
        .create_short_link(Some(url), validity, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Code:    {}", link.short_code.bright_yellow().bold());
    println!("  Target:  {}", link.original_url.cyan());
    println!(
        "  Expires: {}",
        format_timestamp(link.expires_at).bright_black()
    );
    if let Some(base_url) = &config.base_url {
        println!(
            "  Link:    {}/{}",
            base_url.trim_end_matches('/'),
            link.short_code
        );
    }
    println!();

    Ok(())
}

/// Prints a link's metadata and click log.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics for promo
///
///   Target:  https://example.com
///   Created: 2025-01-01T12:00:00.000Z
///   Expires: 2025-01-01T13:00:00.000Z (active)
///   Clicks:  2
///
///   Time                       Referrer                        Location
///   2025-01-01T12:01:00.000Z   direct                          CA, US
/// ```
async fn show_stats(pool: &PgPool, code: &str) -> Result<()> {
    let service = StatsService::new(Arc::new(PgStatsRepository::new(Arc::new(pool.clone()))));

    let link = service
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("No statistics for '{}'", code))?;

    println!(
        "{} {}",
        "📊 Statistics for".bright_blue().bold(),
        code.bright_yellow().bold()
    );
    println!();

    let status = if link.is_expired_at(chrono::Utc::now()) {
        "expired".red()
    } else {
        "active".green()
    };

    println!("  Target:  {}", link.original_url.cyan());
    println!("  Created: {}", format_timestamp(link.created_at));
    println!(
        "  Expires: {} ({})",
        format_timestamp(link.expires_at),
        status
    );
    println!(
        "  Clicks:  {}",
        link.total_clicks().to_string().bright_green().bold()
    );
    println!();

    if link.clicks.is_empty() {
        return Ok(());
    }

    println!(
        "  {:<26} {:<31} {}",
        "Time".bright_white().bold(),
        "Referrer".bright_white().bold(),
        "Location".bright_white().bold()
    );

    for click in &link.clicks {
        println!(
            "  {:<26} {:<31} {}",
            format_timestamp(click.timestamp).bright_black(),
            click.referrer_url,
            click.location_label()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await?;

            let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Clicks:     {}",
                clicks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
