//! Project data source.
//!
//! Dashboards read records through [`ProjectRepository`] so the
//! aggregation code never depends on where the data came from. The only
//! implementation keeps everything in memory, seeded either with the demo
//! data set or from a TOML/JSON data file.

mod seed;

use crate::models::{Project, VerificationRecord, VerificationRequest, VerificationStatus};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Read-only query interface over the portal's records.
pub trait ProjectRepository {
    /// All projects, in display order.
    fn list_projects(&self) -> &[Project];

    /// Every verification request, decided or not.
    fn verification_requests(&self) -> &[VerificationRequest];

    /// Verifications that already reached a decision.
    fn verification_history(&self) -> &[VerificationRecord];

    fn get_project(&self, id: u32) -> Option<&Project> {
        self.list_projects().iter().find(|p| p.id == id)
    }

    /// Verification requests still waiting for an auditor.
    fn pending_verifications(&self) -> Vec<&VerificationRequest> {
        self.verification_requests()
            .iter()
            .filter(|v| v.status == VerificationStatus::Pending)
            .collect()
    }

    fn get_verification(&self, id: u32) -> Option<&VerificationRequest> {
        self.verification_requests().iter().find(|v| v.id == id)
    }
}

/// In-memory record set. Also the on-disk data file layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRepository {
    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub verifications: Vec<VerificationRequest>,

    #[serde(default)]
    pub history: Vec<VerificationRecord>,
}

impl InMemoryRepository {
    /// The demo data set shown when no data file is configured.
    pub fn demo() -> Self {
        Self {
            projects: seed::projects(),
            verifications: seed::pending_verifications(),
            history: seed::verification_history(),
        }
    }

    /// Load a data file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let repo: InMemoryRepository = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse data file: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse data file: {}", path.display()))?
        };

        debug!(
            "Loaded {} projects, {} verification requests from {}",
            repo.projects.len(),
            repo.verifications.len(),
            path.display()
        );

        Ok(repo)
    }
}

impl ProjectRepository for InMemoryRepository {
    fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    fn verification_requests(&self) -> &[VerificationRequest] {
        &self.verifications
    }

    fn verification_history(&self) -> &[VerificationRecord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_demo_data_shape() {
        let repo = InMemoryRepository::demo();
        assert_eq!(repo.list_projects().len(), 3);
        assert_eq!(repo.pending_verifications().len(), 2);
        assert_eq!(repo.verification_requests().len(), 2);
        assert_eq!(repo.verification_history().len(), 2);

        let highway = repo.get_project(1).unwrap();
        assert_eq!(highway.name, "Highway Infrastructure Upgrade");
        assert_eq!(highway.milestones.len(), 5);
        assert!(repo.get_project(99).is_none());

        assert_eq!(
            repo.get_verification(2).map(|v| v.milestone_name.as_str()),
            Some("Renovation Phase 1")
        );
    }

    #[test]
    fn test_load_toml_data_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.toml");
        std::fs::write(
            &path,
            r#"
[[projects]]
id = 7
name = "Bridge Repair"
budget = 900000
contractor = "SpanWorks"
status = "in-progress"
start_date = "2024-04-01"
expected_completion = "2024-10-01"

[[projects.milestones]]
id = 1
name = "Inspection"
status = "completed"
amount = 300000
due_date = "2024-05-01"

[[projects.transactions]]
date = "2024-05-02"
amount = 300000
milestone = "Inspection"
"#,
        )
        .unwrap();

        let repo = InMemoryRepository::load(&path).unwrap();
        assert_eq!(repo.projects.len(), 1);
        assert!(repo.verifications.is_empty());
        let project = repo.get_project(7).unwrap();
        assert_eq!(project.description, "");
        assert_eq!(project.milestones[0].name, "Inspection");
        assert_eq!(project.transactions[0].amount, 300000);
    }

    #[test]
    fn test_decided_requests_leave_the_queue() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("requests.toml");
        std::fs::write(
            &path,
            r#"
[[verifications]]
id = 1
project_id = 1
milestone_id = 2
project_name = "Bridge Repair"
milestone_name = "Deck"
contractor_address = "0xabc"
amount = 18446744073709551615
submitted_date = "2024-06-01"
status = "rejected"

[[verifications]]
id = 2
project_id = 1
milestone_id = 3
project_name = "Bridge Repair"
milestone_name = "Railing"
contractor_address = "0xabc"
amount = 250000
submitted_date = "2024-06-03"
"#,
        )
        .unwrap();

        let repo = InMemoryRepository::load(&path).unwrap();
        assert_eq!(repo.verification_requests().len(), 2);

        let pending: Vec<u32> = repo.pending_verifications().iter().map(|v| v.id).collect();
        assert_eq!(pending, vec![2]);

        // Decided requests stay reachable by id.
        assert_eq!(
            repo.get_verification(1).map(|v| v.status),
            Some(VerificationStatus::Rejected)
        );
        assert_eq!(repo.get_verification(1).map(|v| v.amount), Some(u64::MAX));
    }

    #[test]
    fn test_load_json_round_trips_demo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.json");
        let json = serde_json::to_string(&InMemoryRepository::demo()).unwrap();
        std::fs::write(&path, json).unwrap();

        let repo = InMemoryRepository::load(&path).unwrap();
        assert_eq!(repo.projects, InMemoryRepository::demo().projects);
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[[projects]]\nid = \"nope\"\n").unwrap();

        let err = InMemoryRepository::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
