use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kitchenboard::cli::{self, Dashboard};
use kitchenboard::store::LocalStore;

/// kitchenboard - Kitchen dashboard meal planner
#[derive(Parser)]
#[command(name = "kitchenboard")]
#[command(about = "Rotating meal plan, grocery list and prep reminders", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the recipes for the current meal
    Today,
    /// Current and next meal with prep reminders
    Dashboard {
        /// Keep running and redraw on every interval
        #[arg(long)]
        watch: bool,

        /// Seconds between redraws in watch mode
        #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,
    },
    /// Show the plan for the coming days
    Plan {
        /// Number of days (overrides config file)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },
    /// Show the aggregated grocery list
    Grocery {
        /// Number of days (overrides config file)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },
    /// Mark a grocery item as bought
    Check { key: String },
    /// Unmark a grocery item
    Uncheck { key: String },
    /// Remove every checked mark
    ClearChecked,
    /// Write the grocery list to a text file
    Export {
        #[arg(long, default_value = "grocery.txt")]
        output: PathBuf,

        /// Number of days (overrides config file)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },
    /// List prep work due today or tomorrow
    Prep,
    /// Reload the catalog from the remote source, or the bundled copy
    Refresh,
    /// Shift the rotation forward by one day
    Advance,
    /// Drop the manual rotation shift
    ResetRotation,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = kitchenboard::Config::load(args.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    kitchenboard::observability::init_observability(
        "kitchenboard",
        env!("CARGO_PKG_VERSION"),
        &config.logging.level,
        &config.logging.format,
    )?;

    let mut out = std::io::stdout().lock();

    match args.command {
        Commands::Check { key } => {
            let mut store = LocalStore::open(&config.storage.path)?;
            cli::set_checked(&mut store, &key, true, &mut out)
        }
        Commands::Uncheck { key } => {
            let mut store = LocalStore::open(&config.storage.path)?;
            cli::set_checked(&mut store, &key, false, &mut out)
        }
        Commands::ClearChecked => {
            let mut store = LocalStore::open(&config.storage.path)?;
            cli::clear_checked(&mut store, &mut out)
        }
        Commands::Advance => {
            let mut store = LocalStore::open(&config.storage.path)?;
            cli::advance(&mut store, &mut out)
        }
        Commands::ResetRotation => {
            let mut store = LocalStore::open(&config.storage.path)?;
            cli::reset_rotation(&mut store, &mut out)
        }
        Commands::Refresh => {
            let chain = cli::fallback_chain(&config)?;
            cli::refresh(&chain, &mut out).await
        }
        Commands::Today => cli::today(&Dashboard::load(&config).await?, &mut out),
        Commands::Dashboard {
            watch: true,
            interval_secs,
        } => cli::watch(&config, Duration::from_secs(interval_secs), None, &mut out).await,
        Commands::Dashboard { watch: false, .. } => {
            cli::dashboard(&Dashboard::load(&config).await?, &mut out)
        }
        Commands::Plan { days } => cli::plan(&Dashboard::load(&config).await?, days, &mut out),
        Commands::Grocery { days } => {
            cli::grocery(&Dashboard::load(&config).await?, days, &mut out)
        }
        Commands::Export { output, days } => {
            cli::export(&Dashboard::load(&config).await?, days, &output, &mut out)
        }
        Commands::Prep => cli::prep(&Dashboard::load(&config).await?, &mut out),
    }
}
