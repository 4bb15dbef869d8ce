//! Government portal: budget oversight and project creation.

use crate::analysis::{
    completed_milestones, project_funds_released, project_progress, PortfolioSummary,
};
use crate::error::PortalError;
use crate::models::{Amount, Badge, Project, ProjectStatus};
use crate::repository::ProjectRepository;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

use super::Notification;

/// Fields of the "create project" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub name: String,
    pub budget: Option<Amount>,
    pub description: String,
    /// Contractor wallet address.
    pub contractor: String,
    pub milestones: Option<u32>,
}

impl ProjectDraft {
    /// Required-field check. Values themselves are not validated.
    pub fn validate(&self) -> Result<(), PortalError> {
        if self.name.trim().is_empty() {
            return Err(PortalError::MissingField("project name"));
        }
        if self.budget.is_none() {
            return Err(PortalError::MissingField("budget"));
        }
        if self.contractor.trim().is_empty() {
            return Err(PortalError::MissingField("contractor address"));
        }
        if self.milestones.is_none() {
            return Err(PortalError::MissingField("number of milestones"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct GovernmentView {
    show_create_form: bool,
}

impl GovernmentView {
    pub fn open_create_form(&mut self) {
        self.show_create_form = true;
    }

    pub fn cancel_create_form(&mut self) {
        self.show_create_form = false;
    }

    /// Accept a filled-in form. The form closes on success and stays open
    /// when a required field is missing.
    pub fn create_project(&mut self, draft: ProjectDraft) -> Result<Notification, PortalError> {
        draft.validate()?;

        info!(
            "Project '{}' created for {} ({} milestones)",
            draft.name.trim(),
            draft.contractor.trim(),
            draft.milestones.unwrap_or_default()
        );
        self.show_create_form = false;

        Ok(Notification::new(
            "Project Created Successfully",
            "The project has been recorded on the blockchain.",
        ))
    }

    pub fn render(&self, repo: &dyn ProjectRepository) -> GovernmentDashboard {
        let projects = repo.list_projects();
        let summary = PortfolioSummary::from_projects(projects);

        let contractors: BTreeSet<&str> = projects.iter().map(|p| p.contractor.as_str()).collect();

        GovernmentDashboard {
            active_projects: projects.len() - summary.count(ProjectStatus::Completed),
            contractors: contractors.len(),
            summary,
            projects: projects.iter().map(ProjectRow::from).collect(),
            create_form_open: self.show_create_form,
        }
    }
}

/// One line of the government project list.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub id: u32,
    pub name: String,
    pub contractor: String,
    pub status: ProjectStatus,
    pub badge: Badge,
    pub budget: Amount,
    pub funds_released: Amount,
    pub completed_milestones: usize,
    pub total_milestones: usize,
    pub progress: u8,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            contractor: project.contractor.clone(),
            status: project.status,
            badge: project.status.badge(),
            budget: project.budget,
            funds_released: project_funds_released(project),
            completed_milestones: completed_milestones(project),
            total_milestones: project.milestones.len(),
            progress: project_progress(project),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GovernmentDashboard {
    pub summary: PortfolioSummary,
    pub active_projects: usize,
    /// Distinct contractors engaged.
    pub contractors: usize,
    pub projects: Vec<ProjectRow>,
    pub create_form_open: bool,
}
