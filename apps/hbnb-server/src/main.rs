use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hbnb::bootstrap::apply_seed;
use hbnb::{HbnbApi, HbnbConfig, HbnbFacade};
use runtime::{AppConfig, CliArgs};

/// HBnB Server - rental listings core
#[derive(Parser)]
#[command(name = "hbnb-server")]
#[command(about = "HBnB Server - rental listings core")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration and wire the core
    Check,
    /// Create the configured admin user and amenities
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("HBnB Server starting");

    let hbnb_config: HbnbConfig = config
        .module_config("hbnb")
        .context("Failed to read modules.hbnb")?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config, &hbnb_config).await,
        Commands::Seed => seed(&hbnb_config).await,
    }
}

async fn check_config(config: &AppConfig, hbnb_config: &HbnbConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let facade = HbnbFacade::new(hbnb_config);
    let users = facade.get_all_users().await?;
    tracing::debug!(users = users.len(), "Core wired");

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("home_dir: {}", config.server.home_dir);
    println!(
        "limits: name={} title={} review={}",
        hbnb_config.max_name_length, hbnb_config.max_title_length, hbnb_config.max_review_length
    );
    Ok(())
}

async fn seed(hbnb_config: &HbnbConfig) -> Result<()> {
    let facade = HbnbFacade::new(hbnb_config);
    let report = apply_seed(&facade, &hbnb_config.seed).await?;

    let summary = serde_json::json!({
        "admin_created": report.admin_created,
        "amenities": report.amenities,
        "users": facade.get_all_users().await?.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
