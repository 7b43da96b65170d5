use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use mediasweep::catalog::PlexCatalog;
use mediasweep::cleanup::policy::{Candidate, scan_candidates};
use mediasweep::cleanup::{CleanupEngine, RetentionPolicy};
use mediasweep::config::Config;
use mediasweep::transport::{Channel, TelegramChannel, runtime};
use mediasweep::utils::text::{format_gb, format_mb, truncate_with_ellipsis};
use mediasweep::{SweepError, storage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mediasweep", version, about = "Remote Plex cleanup bot")]
struct Cli {
    /// Path to mediasweep.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot
    Run,
    /// Print the deletion candidates without touching anything
    Preview {
        /// Override the configured view-count cap
        #[arg(long)]
        max_views: Option<u64>,
        /// Override the configured not-watched-in-days filter
        #[arg(long)]
        days: Option<u32>,
    },
    /// Print the storage-usage breakdown
    Space,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).map_err(SweepError::from)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::Preview { max_views, days } => preview(config, max_views, days).await,
        Commands::Space => space(config).await,
    }
}

async fn run_bot(config: Config) -> Result<()> {
    config.validate_bot().map_err(SweepError::from)?;

    let catalog = Arc::new(PlexCatalog::new(
        config.catalog.base_url.clone(),
        config.catalog.token.clone(),
    ));
    let channel: Arc<dyn Channel> = Arc::new(TelegramChannel::new(
        config.telegram.bot_token.clone(),
        config.telegram.chat_id.clone(),
    ));

    let engine = Arc::new(CleanupEngine::new(
        catalog,
        Arc::clone(&channel),
        config.cleanup.retention_policy(),
        config.storage.capacity_gb,
        config.catalog.base_url.clone(),
    ));

    tracing::info!(chat_id = %config.telegram.chat_id, "starting cleanup bot");

    tokio::select! {
        result = runtime::run(engine, channel) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}

async fn preview(config: Config, max_views: Option<u64>, days: Option<u32>) -> Result<()> {
    config.validate_catalog().map_err(SweepError::from)?;

    let mut policy: RetentionPolicy = config.cleanup.retention_policy();
    if let Some(v) = max_views {
        policy.max_view_count = v;
    }
    if let Some(d) = days {
        policy.min_days_since_last_view = Some(d);
    }

    let catalog = PlexCatalog::new(config.catalog.base_url, config.catalog.token);
    let candidates = scan_candidates(&catalog, &policy, Utc::now())
        .await
        .map_err(SweepError::from)?;

    print_candidate_table(&candidates);
    Ok(())
}

async fn space(config: Config) -> Result<()> {
    config.validate_catalog().map_err(SweepError::from)?;

    let catalog = PlexCatalog::new(config.catalog.base_url, config.catalog.token);
    let stats = storage::analyze(&catalog).await.map_err(SweepError::from)?;
    println!("{}", storage::format_report(&stats, config.storage.capacity_gb));
    Ok(())
}

fn print_candidate_table(candidates: &[Candidate]) {
    if candidates.is_empty() {
        println!("\n✓ No movies found matching criteria!");
        return;
    }

    let total: u64 = candidates.iter().map(|c| c.size_bytes).sum();
    let rule = "=".repeat(100);

    println!("\n{rule}");
    println!(
        "MOVIES TO DELETE ({} movies, {} total)",
        candidates.len(),
        format_gb(total)
    );
    println!("{rule}");
    println!(
        "{:<4} {:<45} {:<6} {:<7} {:<12} {:<14}",
        "#", "Title", "Year", "Views", "Size", "Last Watched"
    );
    println!("{}", "-".repeat(100));

    for (idx, c) in candidates.iter().enumerate() {
        let last = c
            .last_viewed_at
            .map_or_else(|| "Never".to_string(), |t| t.format("%Y-%m-%d").to_string());
        println!(
            "{:<4} {:<45} {:<6} {:<7} {:<12} {:<14}",
            idx + 1,
            truncate_with_ellipsis(&c.title, 42),
            c.year.map_or_else(|| "N/A".to_string(), |y| y.to_string()),
            c.view_count,
            format_mb(c.size_bytes),
            last,
        );
    }

    println!("{}", "-".repeat(100));
    println!("TOTAL: {} movies, {}\n", candidates.len(), format_gb(total));
}
