//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.ledgerview.toml` files.

use crate::cli::OutputFormat;
use crate::models::Role;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".ledgerview.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Rendering settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Data source settings.
    #[serde(default)]
    pub data: DataConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Role to open when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<Role>,

    /// Report format.
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_role: None,
            format: default_format(),
            verbose: false,
        }
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Markdown
}

/// Dashboard rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Symbol printed in front of amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Transactions listed per project on the public dashboard.
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,

    /// Include data consistency warnings in reports.
    #[serde(default = "default_true")]
    pub show_warnings: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            recent_transactions: default_recent_transactions(),
            show_warnings: true,
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_recent_transactions() -> usize {
    2
}

fn default_true() -> bool {
    true
}

/// Where project records come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// TOML or JSON data file. The demo data set is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.ledgerview.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(role) = args.role {
            self.general.default_role = Some(role);
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(ref data) = args.data {
            self.data.path = Some(data.clone());
        }
        if let Some(ref symbol) = args.currency {
            self.display.currency_symbol = symbol.clone();
        }
        if let Some(recent) = args.recent {
            self.display.recent_transactions = recent;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
