//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and the translation of flags into dashboard
//! actions.

use crate::dashboard::{Action, ProjectDraft};
use crate::models::{Amount, Role};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// LedgerView - transparency dashboards for public project funding
///
/// Opens one role's dashboard, applies the requested actions and prints
/// the resulting view. Nothing is persisted between runs.
///
/// Examples:
///   ledgerview
///   ledgerview public --search highway
///   ledgerview contractor --submit 1:3
///   ledgerview auditor --review 1 --check 1 --check 2 --notes "ok" --approve 1
///   ledgerview government --create "Harbor Dredging" --budget 3000000 \
///       --contractor 0x742d35Cc --milestones 4
///   ledgerview --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Dashboard to open (government, contractor, auditor, public)
    ///
    /// Without a role the role selector is shown.
    #[arg(value_name = "ROLE")]
    pub role: Option<Role>,

    /// Filter public projects by name or description (case-insensitive)
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Create a project with this name (government)
    #[arg(long, value_name = "NAME")]
    pub create: Option<String>,

    /// Total budget of the new project
    #[arg(long, value_name = "AMOUNT", requires = "create")]
    pub budget: Option<Amount>,

    /// Description of the new project
    #[arg(long, value_name = "TEXT", requires = "create")]
    pub description: Option<String>,

    /// Contractor address of the new project
    #[arg(long, value_name = "ADDRESS", requires = "create")]
    pub contractor: Option<String>,

    /// Number of milestones of the new project
    #[arg(long, value_name = "COUNT", requires = "create")]
    pub milestones: Option<u32>,

    /// Submit a milestone for verification (contractor)
    ///
    /// Can be repeated. Example: --submit 1:3
    #[arg(long, value_name = "PROJECT:MILESTONE")]
    pub submit: Vec<MilestoneRef>,

    /// Open the review panel for a verification request (auditor)
    #[arg(long, value_name = "ID")]
    pub review: Option<u32>,

    /// Tick a checklist item of the open review (1-4, repeatable)
    #[arg(long, value_name = "ITEM", requires = "review")]
    pub check: Vec<usize>,

    /// Verification notes for the open review
    #[arg(long, value_name = "TEXT", requires = "review")]
    pub notes: Option<String>,

    /// Close the open review panel or project form without acting
    #[arg(long)]
    pub cancel: bool,

    /// Approve a verification request and release funds (auditor, repeatable)
    #[arg(long, value_name = "ID")]
    pub approve: Vec<u32>,

    /// Reject a verification request (auditor, repeatable)
    #[arg(long, value_name = "ID")]
    pub reject: Vec<u32>,

    /// TOML or JSON data file to read projects from
    ///
    /// The built-in demo data set is used when omitted.
    #[arg(long, value_name = "FILE", env = "LEDGERVIEW_DATA")]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .ledgerview.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Currency symbol used for amounts
    #[arg(long, value_name = "SYMBOL")]
    pub currency: Option<String>,

    /// Transactions shown per project on the public dashboard
    #[arg(long, value_name = "COUNT")]
    pub recent: Option<usize>,

    /// Exit with code 2 when the data has consistency warnings
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .ledgerview.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// `PROJECT:MILESTONE` pair given to `--submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilestoneRef {
    pub project_id: u32,
    pub milestone_id: u32,
}

impl FromStr for MilestoneRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (project, milestone) = s
            .split_once(':')
            .ok_or_else(|| format!("expected PROJECT:MILESTONE, got '{}'", s))?;

        let project_id = project
            .trim()
            .parse()
            .map_err(|_| format!("invalid project id '{}'", project))?;
        let milestone_id = milestone
            .trim()
            .parse()
            .map_err(|_| format!("invalid milestone id '{}'", milestone))?;

        Ok(Self {
            project_id,
            milestone_id,
        })
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Checklist items are numbered from 1
        if let Some(&item) = self
            .check
            .iter()
            .find(|&&i| i == 0 || i > crate::dashboard::CHECKLIST.len())
        {
            return Err(format!(
                "Checklist item must be between 1 and {}, got {}",
                crate::dashboard::CHECKLIST.len(),
                item
            ));
        }

        if let Some(ref symbol) = self.currency {
            if symbol.trim().is_empty() {
                return Err("Currency symbol cannot be empty".to_string());
            }
        }

        // Validate data file if provided
        if let Some(ref data) = self.data {
            if !data.is_file() {
                return Err(format!("Data file does not exist: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `verbose` setting of the config file;
    /// `--quiet` overrides it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// The project form filled in from `--create` and its companions.
    pub fn project_draft(&self) -> Option<ProjectDraft> {
        self.create.as_ref().map(|name| ProjectDraft {
            name: name.clone(),
            budget: self.budget,
            description: self.description.clone().unwrap_or_default(),
            contractor: self.contractor.clone().unwrap_or_default(),
            milestones: self.milestones,
        })
    }

    /// Requested actions, in application order: search, create, submit,
    /// review, checklist, notes, cancel, approve, reject.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(ref term) = self.search {
            actions.push(Action::Search(term.clone()));
        }
        if let Some(draft) = self.project_draft() {
            actions.push(Action::CreateProject(draft));
        }
        actions.extend(self.submit.iter().map(|r| Action::SubmitMilestone {
            project_id: r.project_id,
            milestone_id: r.milestone_id,
        }));
        if let Some(id) = self.review {
            actions.push(Action::Review(id));
        }
        actions.extend(self.check.iter().map(|&i| Action::ToggleCheck(i - 1)));
        if let Some(ref notes) = self.notes {
            actions.push(Action::Notes(notes.clone()));
        }
        if self.cancel {
            actions.push(Action::Cancel);
        }
        actions.extend(self.approve.iter().map(|&id| Action::Approve(id)));
        actions.extend(self.reject.iter().map(|&id| Action::Reject(id)));

        actions
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_args() -> Args {
        Args {
            role: None,
            search: None,
            create: None,
            budget: None,
            description: None,
            contractor: None,
            milestones: None,
            submit: Vec::new(),
            review: None,
            check: Vec::new(),
            notes: None,
            cancel: false,
            approve: Vec::new(),
            reject: Vec::new(),
            data: None,
            config: None,
            format: None,
            output: None,
            currency: None,
            recent: None,
            strict: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_role_and_flags() {
        let args = Args::try_parse_from([
            "ledgerview",
            "auditor",
            "--review",
            "1",
            "--check",
            "2",
            "--approve",
            "1",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.role, Some(Role::Auditor));
        assert_eq!(args.review, Some(1));
        assert_eq!(args.check, vec![2]);
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_create_companions_require_create() {
        let result = Args::try_parse_from(["ledgerview", "government", "--budget", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_milestone_ref_parsing() {
        assert_eq!(
            "1:3".parse::<MilestoneRef>(),
            Ok(MilestoneRef {
                project_id: 1,
                milestone_id: 3
            })
        );
        assert!("13".parse::<MilestoneRef>().is_err());
        assert!("a:3".parse::<MilestoneRef>().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_checklist_range() {
        let mut args = make_args();
        args.review = Some(1);
        args.check = vec![1, 4];
        assert!(args.validate().is_ok());

        args.check = vec![0];
        assert!(args.validate().is_err());
        args.check = vec![5];
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }

    #[test]
    fn test_actions_order() {
        let mut args = make_args();
        args.reject = vec![2];
        args.approve = vec![1];
        args.notes = Some("fine".to_string());
        args.check = vec![1];
        args.review = Some(1);
        args.cancel = true;

        assert_eq!(
            args.actions(),
            vec![
                Action::Review(1),
                Action::ToggleCheck(0),
                Action::Notes("fine".to_string()),
                Action::Cancel,
                Action::Approve(1),
                Action::Reject(2),
            ]
        );
    }

    #[test]
    fn test_project_draft_from_flags() {
        let mut args = make_args();
        assert!(args.project_draft().is_none());

        args.create = Some("Harbor Dredging".to_string());
        args.budget = Some(3_000_000);
        args.milestones = Some(4);
        let draft = args.project_draft().unwrap();
        assert_eq!(draft.name, "Harbor Dredging");
        assert_eq!(draft.contractor, "");
        assert!(draft.validate().is_err());
    }
}
