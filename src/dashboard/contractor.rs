//! Contractor dashboard: milestone submission and earnings.

use crate::analysis::{completed_milestones, earned_amount, pending_amount, project_progress};
use crate::error::PortalError;
use crate::models::{Amount, Badge, Milestone, MilestoneStatus, Project, ProjectStatus};
use crate::repository::ProjectRepository;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use super::Notification;

/// Contractors work on projects that are not yet completed.
fn active_projects(repo: &dyn ProjectRepository) -> Vec<Project> {
    repo.list_projects()
        .iter()
        .filter(|p| p.status != ProjectStatus::Completed)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ContractorView {
    /// (project id, milestone id) pairs handed in this session.
    submitted: Vec<(u32, u32)>,
}

impl ContractorView {
    /// Hand in an in-progress milestone for verification.
    pub fn submit_milestone(
        &mut self,
        repo: &dyn ProjectRepository,
        project_id: u32,
        milestone_id: u32,
    ) -> Result<Notification, PortalError> {
        let project = repo
            .get_project(project_id)
            .ok_or(PortalError::UnknownProject(project_id))?;
        let milestone = project
            .milestone(milestone_id)
            .ok_or(PortalError::UnknownMilestone {
                project_id,
                milestone_id,
            })?;

        if self.is_submitted(project_id, milestone_id) {
            return Err(PortalError::AlreadySubmitted {
                project_id,
                milestone_id,
            });
        }
        if !milestone.status.is_submittable() {
            return Err(PortalError::MilestoneNotSubmittable {
                name: milestone.name.clone(),
                status: milestone.status,
            });
        }

        info!("Submitted '{}' of '{}'", milestone.name, project.name);
        self.submitted.push((project_id, milestone_id));

        Ok(Notification::new(
            "Milestone Submitted",
            "Your milestone completion has been submitted for verification.",
        ))
    }

    fn is_submitted(&self, project_id: u32, milestone_id: u32) -> bool {
        self.submitted.contains(&(project_id, milestone_id))
    }

    pub fn render(&self, repo: &dyn ProjectRepository) -> ContractorDashboard {
        let projects = active_projects(repo);

        ContractorDashboard {
            earned: earned_amount(&projects),
            pending: pending_amount(&projects),
            active_projects: projects.len(),
            projects: projects
                .iter()
                .map(|project| ContractorProject {
                    id: project.id,
                    name: project.name.clone(),
                    budget: project.budget,
                    completed_milestones: completed_milestones(project),
                    total_milestones: project.milestones.len(),
                    progress: project_progress(project),
                    milestones: project
                        .milestones
                        .iter()
                        .map(|m| self.milestone_row(project.id, m))
                        .collect(),
                })
                .collect(),
        }
    }

    fn milestone_row(&self, project_id: u32, milestone: &Milestone) -> MilestoneRow {
        let submitted = self.is_submitted(project_id, milestone.id);
        MilestoneRow {
            id: milestone.id,
            name: milestone.name.clone(),
            status: milestone.status,
            badge: milestone.status.badge(),
            amount: milestone.amount,
            due_date: milestone.due_date,
            can_submit: milestone.status.is_submittable() && !submitted,
            submitted_this_session: submitted,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneRow {
    pub id: u32,
    pub name: String,
    pub status: MilestoneStatus,
    pub badge: Badge,
    pub amount: Amount,
    pub due_date: NaiveDate,
    pub can_submit: bool,
    pub submitted_this_session: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractorProject {
    pub id: u32,
    pub name: String,
    pub budget: Amount,
    pub completed_milestones: usize,
    pub total_milestones: usize,
    pub progress: u8,
    pub milestones: Vec<MilestoneRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractorDashboard {
    /// Paid out for completed milestones.
    pub earned: Amount,
    /// Submitted and awaiting verification.
    pub pending: Amount,
    pub active_projects: usize,
    pub projects: Vec<ContractorProject>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    #[test]
    fn test_submit_in_progress_milestone() {
        let repo = InMemoryRepository::demo();
        let mut view = ContractorView::default();

        let note = view.submit_milestone(&repo, 1, 3).unwrap();
        assert_eq!(note.title, "Milestone Submitted");

        let dash = view.render(&repo);
        let row = &dash.projects[0].milestones[2];
        assert!(row.submitted_this_session);
        assert!(!row.can_submit);
        assert_eq!(row.status, MilestoneStatus::InProgress);
    }

    #[test]
    fn test_submit_rejects_other_statuses() {
        let repo = InMemoryRepository::demo();
        let mut view = ContractorView::default();

        for (project, milestone, status) in [
            (1, 1, MilestoneStatus::Completed),
            (1, 4, MilestoneStatus::Pending),
            (2, 2, MilestoneStatus::Submitted),
        ] {
            match view.submit_milestone(&repo, project, milestone) {
                Err(PortalError::MilestoneNotSubmittable { status: s, .. }) => {
                    assert_eq!(s, status)
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_submit_twice_is_rejected() {
        let repo = InMemoryRepository::demo();
        let mut view = ContractorView::default();
        view.submit_milestone(&repo, 1, 3).unwrap();
        assert_eq!(
            view.submit_milestone(&repo, 1, 3),
            Err(PortalError::AlreadySubmitted {
                project_id: 1,
                milestone_id: 3
            })
        );
    }

    #[test]
    fn test_submit_unknown_ids() {
        let repo = InMemoryRepository::demo();
        let mut view = ContractorView::default();
        assert_eq!(
            view.submit_milestone(&repo, 42, 1),
            Err(PortalError::UnknownProject(42))
        );
        assert_eq!(
            view.submit_milestone(&repo, 1, 42),
            Err(PortalError::UnknownMilestone {
                project_id: 1,
                milestone_id: 42
            })
        );
    }

    #[test]
    fn test_render_earnings() {
        let repo = InMemoryRepository::demo();
        let dash = ContractorView::default().render(&repo);

        assert_eq!(dash.active_projects, 2);
        assert_eq!(dash.earned, 2_833_333);
        assert_eq!(dash.pending, 833_333);
        assert_eq!(dash.projects[1].completed_milestones, 1);
        assert!(dash.projects[0].milestones[2].can_submit);
        assert!(!dash.projects[0].milestones[0].can_submit);
    }
}
