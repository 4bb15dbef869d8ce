//! Data models for the transparency portal.
//!
//! This module contains the records shown on every dashboard: projects,
//! milestones, fund-release transactions and verification requests, plus
//! the status enumerations and their badge table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency amount in whole units.
pub type Amount = u64;

/// The four mutually exclusive portal views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Government,
    Contractor,
    Auditor,
    Public,
}

impl Role {
    /// All roles in selector order.
    pub const ALL: [Role; 4] = [
        Role::Government,
        Role::Contractor,
        Role::Auditor,
        Role::Public,
    ];

    /// Title shown on the role card and the dashboard header.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Government => "Government Portal",
            Role::Contractor => "Contractor Dashboard",
            Role::Auditor => "Auditor Interface",
            Role::Public => "Public Transparency",
        }
    }

    /// One-line description shown on the role card.
    pub fn description(&self) -> &'static str {
        match self {
            Role::Government => "Create projects, manage budgets, and track fund allocation",
            Role::Contractor => "Submit milestone completions and track project progress",
            Role::Auditor => "Verify milestones and validate project deliverables",
            Role::Public => "View project progress, fund flows, and government spending",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Role::Government => "🏛️",
            Role::Contractor => "👷",
            Role::Auditor => "🛡️",
            Role::Public => "🔍",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Government => write!(f, "government"),
            Role::Contractor => write!(f, "contractor"),
            Role::Auditor => write!(f, "auditor"),
            Role::Public => write!(f, "public"),
        }
    }
}

/// Colour family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Crypto,
    Danger,
    Neutral,
}

impl Tone {
    /// Returns an emoji swatch for the tone.
    pub fn emoji(&self) -> &'static str {
        match self {
            Tone::Success => "🟢",
            Tone::Warning => "🟡",
            Tone::Crypto => "🟣",
            Tone::Danger => "🔴",
            Tone::Neutral => "⚪",
        }
    }
}

/// Visual treatment of a status: label, colour and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
    pub icon: &'static str,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tone.emoji(), self.label)
    }
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    InProgress,
    PendingVerification,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::InProgress,
        ProjectStatus::PendingVerification,
        ProjectStatus::Completed,
    ];

    pub fn badge(&self) -> Badge {
        match self {
            ProjectStatus::InProgress => Badge {
                label: "In Progress",
                tone: Tone::Crypto,
                icon: "🔄",
            },
            ProjectStatus::PendingVerification => Badge {
                label: "Pending Verification",
                tone: Tone::Warning,
                icon: "⏳",
            },
            ProjectStatus::Completed => Badge {
                label: "Completed",
                tone: Tone::Success,
                icon: "✅",
            },
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge().label)
    }
}

/// Status of a single milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Submitted,
    Completed,
}

impl MilestoneStatus {
    pub fn badge(&self) -> Badge {
        match self {
            MilestoneStatus::Pending => Badge {
                label: "Pending",
                tone: Tone::Neutral,
                icon: "🕒",
            },
            MilestoneStatus::InProgress => Badge {
                label: "In Progress",
                tone: Tone::Crypto,
                icon: "🔶",
            },
            MilestoneStatus::Submitted => Badge {
                label: "Submitted",
                tone: Tone::Warning,
                icon: "📤",
            },
            MilestoneStatus::Completed => Badge {
                label: "Completed",
                tone: Tone::Success,
                icon: "✅",
            },
        }
    }

    /// Only work in progress can be handed in for verification.
    pub fn is_submittable(&self) -> bool {
        matches!(self, MilestoneStatus::InProgress)
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge().label)
    }
}

/// Outcome of an auditor's verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn badge(&self) -> Badge {
        match self {
            VerificationStatus::Pending => Badge {
                label: "Pending Review",
                tone: Tone::Warning,
                icon: "⚠️",
            },
            VerificationStatus::Approved => Badge {
                label: "Approved",
                tone: Tone::Success,
                icon: "✅",
            },
            VerificationStatus::Rejected => Badge {
                label: "Rejected",
                tone: Tone::Danger,
                icon: "❌",
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, VerificationStatus::Pending)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Approved => write!(f, "approved"),
            VerificationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Kind of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    #[default]
    FundRelease,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::FundRelease => write!(f, "Fund Release"),
        }
    }
}

/// A payment recorded against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Amount,
    #[serde(default)]
    pub kind: TransactionKind,
    /// Name of the milestone the payment was released for.
    pub milestone: String,
}

/// A payable unit of work within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Identifier, unique within its project.
    pub id: u32,
    pub name: String,
    pub status: MilestoneStatus,
    pub amount: Amount,
    pub due_date: NaiveDate,
}

/// A publicly funded project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Total allocated budget.
    pub budget: Amount,
    /// Contractor name or wallet address.
    pub contractor: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub expected_completion: NaiveDate,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Project {
    /// Look up a milestone by its id.
    pub fn milestone(&self, id: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == id)
    }
}

/// Kind of a supporting document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Images,
    Document,
}

impl DocumentKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            DocumentKind::Images => "🖼️",
            DocumentKind::Document => "📄",
        }
    }
}

/// Evidence attached to a verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    /// Human readable size, e.g. "2.8 MB".
    pub size: String,
    pub kind: DocumentKind,
}

/// A contractor's claim that a milestone is done, awaiting an auditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: u32,
    pub project_id: u32,
    pub milestone_id: u32,
    pub project_name: String,
    pub milestone_name: String,
    pub contractor_address: String,
    pub amount: Amount,
    pub submitted_date: NaiveDate,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: VerificationStatus,
}

/// A finished verification, as listed in the auditor's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: u32,
    pub project_name: String,
    pub milestone_name: String,
    pub status: VerificationStatus,
    pub verified_date: NaiveDate,
    pub amount: Amount,
}
