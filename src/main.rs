//! LedgerView - Government Transparency Portal
//!
//! A CLI that renders role-based transparency dashboards (government,
//! contractor, auditor, public) over project, milestone and fund-release
//! records, and simulates the actions each role can take. Every run is a
//! single session; nothing is persisted.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, data file, rejected action, etc.)
//!   2 - Data consistency warnings found and --strict set

mod analysis;
mod cli;
mod config;
mod dashboard;
mod error;
mod models;
mod report;
mod repository;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use dashboard::Portal;
use report::{Report, ReportMetadata};
use repository::{InMemoryRepository, ProjectRepository};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration first: its verbose setting picks the log level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("LedgerView v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match run_session(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Session failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .ledgerview.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to set a default role, output format, currency or data file.");
    Ok(())
}

/// Initialize logging at the given level.
///
/// Logs go to stderr so reports on stdout stay machine readable.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run one portal session. Returns exit code (0 or 2).
fn run_session(args: Args, config: Config) -> Result<i32> {
    let (repo, data_source) = load_repository(&config)?;

    let warnings: Vec<String> = analysis::check_all(repo.list_projects())
        .iter()
        .map(ToString::to_string)
        .collect();
    for warning in &warnings {
        warn!("{}", warning);
    }

    let mut portal = Portal::new();
    if let Some(role) = config.general.default_role {
        portal.enter(role);
    }

    // Apply interactions in order; the first rejected one ends the session
    let mut notifications = Vec::new();
    for action in args.actions() {
        let name = action.name();
        let outcome = portal
            .dispatch(&repo, action)
            .with_context(|| format!("Failed to {}", name))?;

        if let Some(note) = outcome {
            info!("{}: {}", note.title, note.description);
            notifications.push(note);
        }
    }

    let report = Report {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            data_source,
            role: portal.role(),
        },
        dashboard: portal.render(&repo, config.display.recent_transactions),
        notifications,
        warnings: if config.display.show_warnings {
            warnings.clone()
        } else {
            Vec::new()
        },
    };

    let output = match config.general.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&report, &config.display.currency_symbol)
        }
    };

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !args.quiet {
                println!("✅ Report saved to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }

    if let Some(role) = portal.back() {
        debug!("Left {} view", role);
    }

    // Check --strict
    if args.strict && !warnings.is_empty() {
        eprintln!(
            "\n⛔ {} data consistency warning(s) found. Failing (exit code 2).",
            warnings.len()
        );
        return Ok(2);
    }

    Ok(0)
}

/// Where the session's configuration came from.
///
/// Config is read before logging is set up, so this is logged afterwards.
enum ConfigSource {
    File(PathBuf),
    Defaults,
    Invalid(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::Invalid(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::File(PathBuf::from(CONFIG_FILE)))),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::Invalid(e))),
    }
}

/// Build the repository from the configured data file, or the demo set.
fn load_repository(config: &Config) -> Result<(InMemoryRepository, String)> {
    match config.data.path {
        Some(ref path) => {
            info!("Loading data from: {}", path.display());
            let repo = InMemoryRepository::load(path)?;
            Ok((repo, path.display().to_string()))
        }
        None => {
            debug!("No data file configured, using demo data");
            Ok((InMemoryRepository::demo(), "demo data".to_string()))
        }
    }
}
