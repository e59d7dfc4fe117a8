//! SWORD deposit dispatch CLI
//!
//! Operator surface for manager-initiated deposit runs: loads a context
//! configuration and a submission description, then performs one dispatch
//! across all configured deposit points.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use sword_depositor::{
    DispatchCoordinator, DispatchReport, LogMailer, PublishEvent, Submission, SwordClient,
    SwordConfig, SystemClock, describe_deposit_point,
};
use tracing_subscriber::EnvFilter;

/// SWORD deposit dispatch for published submissions
#[derive(Parser)]
#[command(name = "sword-depositor")]
#[command(version = "0.1.0")]
#[command(about = "SWORD deposit dispatch for published submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one deposit dispatch for a submission
    Deposit {
        /// Context configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Submission description file (JSON)
        #[arg(short, long)]
        submission: PathBuf,
    },

    /// List the configured deposit points with masked credentials
    Points {
        /// Context configuration file (YAML)
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Deposit { config, submission } => run_deposit(&config, &submission).await,
        Commands::Points { config } => list_points(&config).await,
    };

    if let Err(error) = result {
        eprintln!("❌ {error:#}");
        process::exit(1);
    }
}

async fn run_deposit(config_path: &PathBuf, submission_path: &PathBuf) -> Result<()> {
    let config = SwordConfig::load(config_path).await?;
    let raw = tokio::fs::read_to_string(submission_path)
        .await
        .with_context(|| format!("failed to read {}", submission_path.display()))?;
    let submission: Submission = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", submission_path.display()))?;

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = Arc::new(SwordClient::new(timeout)?);
    let coordinator = DispatchCoordinator::new(
        config,
        client,
        Arc::new(LogMailer),
        Arc::new(SystemClock),
    );

    match coordinator.handle_publish(&PublishEvent { submission }).await {
        None => {
            println!("Submission is not published; nothing to deposit.");
            Ok(())
        }
        Some(report) => {
            print_summary(&report);
            if report.success {
                Ok(())
            } else {
                anyhow::bail!("{}", report.status_line())
            }
        }
    }
}

async fn list_points(config_path: &PathBuf) -> Result<()> {
    let config = SwordConfig::load(config_path).await?;
    if config.deposit_points.is_empty() {
        println!("No deposit points configured for {}", config.context_name);
        return Ok(());
    }

    println!("Deposit points for {}:", config.context_name);
    for point in &config.deposit_points {
        println!("  {}", describe_deposit_point(point));
    }
    Ok(())
}

fn print_summary(report: &DispatchReport) {
    println!("\n{}", "=".repeat(60));
    println!("📊 Deposit Dispatch Summary ({})", report.run_id);
    println!("{}", "=".repeat(60));

    if !report.directory_name.is_empty() {
        println!("Package directory: {}", report.directory_name);
    }
    for outcome in &report.outcomes {
        if outcome.success {
            println!("✅ {}", outcome.deposit_point_name);
        } else {
            println!(
                "❌ {}: {}",
                outcome.deposit_point_name,
                outcome.message.as_deref().unwrap_or("unknown error")
            );
        }
    }

    println!("{}", "=".repeat(60));
    println!("Status: {}", report.status_line());
    println!("{}\n", "=".repeat(60));
}
