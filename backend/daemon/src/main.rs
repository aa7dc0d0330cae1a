use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use napsign_client::NapcatClient;
use napsign_config::{config_dir, config_file_path, load_and_validate, NapsignConfig};
use napsign_scheduler::{run_batch, DailyScheduler, Schedule};

#[derive(Parser)]
#[command(name = "napsign")]
#[command(about = "Daily NapCat group check-in daemon")]
#[command(version)]
struct Cli {
    /// Path to config.toml (default: <config dir>/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon: one check-in batch per day at the configured time
    Run,
    /// Run a single check-in batch right now and exit
    Checkin,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Run => run_daemon(config_path).await,
        Commands::Checkin => checkin_once(config_path).await,
    }
}

async fn run_daemon(config_path: PathBuf) -> Result<()> {
    napsign_logging::init_logger(Some(&config_dir().join("logs")), "info");

    let config = load_valid_config(&config_path).await?;
    info!(
        fire_time = %config.sign_core.auto_checkin_time,
        utc_offset = config.sign_core.timezone,
        napcat = %format!("{}:{}", config.napcat_service.host, config.napcat_service.port),
        "Starting napsign daemon"
    );

    let schedule = Schedule::from_config(&config.sign_core)?;
    let client = Arc::new(NapcatClient::new(&config.napcat_service)?);

    let (stop_tx, stop_rx) = watch::channel(false);
    let scheduler = DailyScheduler::new(schedule, client, stop_rx).spawn();

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received; stopping after any in-flight batch");
    let _ = stop_tx.send(true);
    let _ = scheduler.await;
    Ok(())
}

async fn checkin_once(config_path: PathBuf) -> Result<()> {
    napsign_logging::init_logger(None, "info");

    let config = load_valid_config(&config_path).await?;
    let client = NapcatClient::new(&config.napcat_service)?;

    let outcome = run_batch(&client).await;
    println!(
        "checked in {}/{} groups ({} failed)",
        outcome.succeeded, outcome.total, outcome.failed
    );
    for failure in &outcome.failures {
        println!("  group {}: {}", failure.group, failure.reason);
    }
    if outcome.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Load the config and refuse to continue on any validation error. Errors
/// are already logged field by field; scheduling never starts on a bad
/// config.
async fn load_valid_config(path: &std::path::Path) -> Result<NapsignConfig> {
    let (config, report) = load_and_validate(path).await?;
    if !report.is_valid() {
        bail!(
            "configuration invalid ({} error(s)); daily check-in not started",
            report.errors.len()
        );
    }
    Ok(config)
}
