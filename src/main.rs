use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use opsi_stats::config::Config;
use opsi_stats::display::DisplayManager;
use opsi_stats::logging::init_logging;
use opsi_stats::{MonthKey, OpsiMonthStats};

#[derive(Parser)]
#[command(name = "opsi-stats")]
#[command(about = "Monthly CL1 statistics and action point usage")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show battle and Akashi encounter counts for a month
    Summary {
        /// Output in JSON format (includes the raw stats store)
        #[arg(long)]
        json: bool,
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
        /// Automation install root (overrides config)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Show action points spent on a campaign in a month
    Ap {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
        /// Campaign export directory under screenshots/
        #[arg(long)]
        campaign: Option<String>,
        /// Automation install root (overrides config)
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Summary {
        json: false,
        year: None,
        month: None,
        root: None,
    });
    let json = match &command {
        Commands::Summary { json, .. } | Commands::Ap { json, .. } => *json,
    };

    if let Err(e) = run(command) {
        handle_error(e, json);
    }
}

fn run(command: Commands) -> Result<()> {
    let mut config = Config::load_layered().context("Failed to load configuration")?;
    let display = DisplayManager::new();

    match command {
        Commands::Summary {
            json,
            year,
            month,
            root,
        } => {
            apply_root(&mut config, root);
            let _guard = init_logging(&config.logging, &config.paths.diagnostics_directory());
            config.validate().context("Invalid configuration")?;
            let stats = OpsiMonthStats::from_config(&config);

            let summary = stats.summary(year, month)?;
            display.display_summary(&summary, json);
        }
        Commands::Ap {
            json,
            year,
            month,
            campaign,
            root,
        } => {
            apply_root(&mut config, root);
            let _guard = init_logging(&config.logging, &config.paths.diagnostics_directory());
            config.validate().context("Invalid configuration")?;
            let stats = OpsiMonthStats::from_config(&config);

            let key = MonthKey::from_parts(year, month)?;
            let campaign = campaign.unwrap_or_else(|| stats.default_campaign().to_string());
            opsi_stats::config::validate_campaign(&campaign)?;

            let estimate = stats.resolve_ap(&key, &campaign);
            display.display_ap(&estimate, json);
        }
    }

    Ok(())
}

fn apply_root(config: &mut Config, root: Option<PathBuf>) {
    if let Some(root) = root {
        config.paths.project_root = root;
    }
}

fn handle_error(e: anyhow::Error, json: bool) -> ! {
    if json {
        println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
    } else {
        eprintln!("Error: {:#}", e);
    }
    process::exit(1);
}
