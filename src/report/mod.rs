//! Dashboard reports.

mod generator;

pub use generator::{generate_json_report, generate_markdown_report};

use crate::dashboard::{Dashboard, Notification};
use crate::models::Role;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about a rendered session.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    /// Data file path, or "demo data".
    pub data_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Everything a session shows: the final dashboard plus the notifications
/// raised on the way there.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub dashboard: Dashboard,
    pub notifications: Vec<Notification>,
    /// Data consistency warnings.
    pub warnings: Vec<String>,
}
