//! Role-scoped dashboard views.
//!
//! A [`Portal`] owns at most one view at a time. Entering a role builds a
//! fresh view state; going back discards it. Views never modify the
//! repository: actions only change view state and yield a
//! [`Notification`] for the user.

mod auditor;
mod contractor;
mod government;
mod public;

pub use auditor::{AuditorDashboard, AuditorView, CHECKLIST};
pub use contractor::{ContractorDashboard, ContractorView};
pub use government::{GovernmentDashboard, GovernmentView, ProjectDraft};
pub use public::{PublicDashboard, PublicView};

use crate::error::PortalError;
use crate::models::Role;
use crate::repository::ProjectRepository;
use serde::Serialize;
use tracing::debug;

/// Transient confirmation shown after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A user interaction, applied to whichever view is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateProject(ProjectDraft),
    SubmitMilestone { project_id: u32, milestone_id: u32 },
    Review(u32),
    /// Flip a checklist item (zero-based).
    ToggleCheck(usize),
    Notes(String),
    /// Close the open form or review panel.
    Cancel,
    Approve(u32),
    Reject(u32),
    Search(String),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateProject(_) => "create project",
            Action::SubmitMilestone { .. } => "submit milestone",
            Action::Review(_) => "review",
            Action::ToggleCheck(_) => "checklist",
            Action::Notes(_) => "notes",
            Action::Cancel => "cancel",
            Action::Approve(_) => "approve",
            Action::Reject(_) => "reject",
            Action::Search(_) => "search",
        }
    }
}

/// State of the currently displayed dashboard.
#[derive(Debug, Clone)]
pub enum View {
    Government(GovernmentView),
    Contractor(ContractorView),
    Auditor(AuditorView),
    Public(PublicView),
}

impl View {
    pub fn new(role: Role) -> Self {
        match role {
            Role::Government => View::Government(GovernmentView::default()),
            Role::Contractor => View::Contractor(ContractorView::default()),
            Role::Auditor => View::Auditor(AuditorView::default()),
            Role::Public => View::Public(PublicView::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            View::Government(_) => Role::Government,
            View::Contractor(_) => Role::Contractor,
            View::Auditor(_) => Role::Auditor,
            View::Public(_) => Role::Public,
        }
    }

    /// Apply one action. Returns the notification to display, if any.
    pub fn apply(
        &mut self,
        repo: &dyn ProjectRepository,
        action: Action,
    ) -> Result<Option<Notification>, PortalError> {
        match (self, action) {
            (View::Government(view), Action::CreateProject(draft)) => {
                view.open_create_form();
                view.create_project(draft).map(Some)
            }
            (View::Government(view), Action::Cancel) => {
                view.cancel_create_form();
                Ok(None)
            }
            (
                View::Contractor(view),
                Action::SubmitMilestone {
                    project_id,
                    milestone_id,
                },
            ) => view
                .submit_milestone(repo, project_id, milestone_id)
                .map(Some),
            (View::Auditor(view), Action::Review(id)) => view.review(repo, id).map(|_| None),
            (View::Auditor(view), Action::ToggleCheck(index)) => {
                view.toggle_check(index).map(|_| None)
            }
            (View::Auditor(view), Action::Notes(text)) => view.set_notes(text).map(|_| None),
            (View::Auditor(view), Action::Cancel) => {
                view.cancel_review();
                Ok(None)
            }
            (View::Auditor(view), Action::Approve(id)) => view.approve(repo, id).map(Some),
            (View::Auditor(view), Action::Reject(id)) => view.reject(repo, id).map(Some),
            (View::Public(view), Action::Search(term)) => {
                view.set_search(term);
                Ok(None)
            }
            (view, action) => Err(PortalError::ActionNotAvailable {
                action: action.name(),
                role: view.role(),
            }),
        }
    }

    fn render(&self, repo: &dyn ProjectRepository, recent_transactions: usize) -> Dashboard {
        match self {
            View::Government(view) => Dashboard::Government(view.render(repo)),
            View::Contractor(view) => Dashboard::Contractor(view.render(repo)),
            View::Auditor(view) => Dashboard::Auditor(view.render(repo)),
            View::Public(view) => Dashboard::Public(view.render(repo, recent_transactions)),
        }
    }
}

/// Role selector: the entry point of every session.
#[derive(Debug, Clone, Default)]
pub struct Portal {
    view: Option<View>,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a role's dashboard with fresh view state.
    pub fn enter(&mut self, role: Role) {
        debug!("Entering {} view", role);
        self.view = Some(View::new(role));
    }

    /// Leave the current dashboard, discarding its state.
    pub fn back(&mut self) -> Option<Role> {
        self.view.take().map(|v| v.role())
    }

    pub fn role(&self) -> Option<Role> {
        self.view.as_ref().map(View::role)
    }

    /// Apply an action to the active view.
    pub fn dispatch(
        &mut self,
        repo: &dyn ProjectRepository,
        action: Action,
    ) -> Result<Option<Notification>, PortalError> {
        let view = self.view.as_mut().ok_or(PortalError::NoRoleSelected)?;
        view.apply(repo, action)
    }

    /// Snapshot of what the user currently sees.
    pub fn render(&self, repo: &dyn ProjectRepository, recent_transactions: usize) -> Dashboard {
        match &self.view {
            Some(view) => view.render(repo, recent_transactions),
            None => Dashboard::Selector(RoleSelector::new()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleCard {
    pub role: Role,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleSelector {
    pub roles: Vec<RoleCard>,
}

impl RoleSelector {
    fn new() -> Self {
        Self {
            roles: Role::ALL
                .iter()
                .map(|&role| RoleCard {
                    role,
                    title: role.title(),
                    description: role.description(),
                })
                .collect(),
        }
    }
}

/// Rendered content of a dashboard, ready for a report generator.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Dashboard {
    Selector(RoleSelector),
    Government(GovernmentDashboard),
    Contractor(ContractorDashboard),
    Auditor(AuditorDashboard),
    Public(PublicDashboard),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    #[test]
    fn test_portal_starts_at_selector() {
        let portal = Portal::new();
        let repo = InMemoryRepository::demo();
        assert_eq!(portal.role(), None);
        match portal.render(&repo, 2) {
            Dashboard::Selector(selector) => assert_eq!(selector.roles.len(), 4),
            other => panic!("expected selector, got {:?}", other),
        }
    }

    #[test]
    fn test_enter_and_back() {
        let mut portal = Portal::new();
        portal.enter(Role::Public);
        assert_eq!(portal.role(), Some(Role::Public));
        assert_eq!(portal.back(), Some(Role::Public));
        assert_eq!(portal.role(), None);
        assert_eq!(portal.back(), None);
    }

    #[test]
    fn test_reentering_discards_view_state() {
        let repo = InMemoryRepository::demo();
        let mut portal = Portal::new();
        portal.enter(Role::Public);
        portal
            .dispatch(&repo, Action::Search("zzz".to_string()))
            .unwrap();
        portal.back();
        portal.enter(Role::Public);

        match portal.render(&repo, 2) {
            Dashboard::Public(dash) => {
                assert_eq!(dash.search_term, "");
                assert_eq!(dash.results.len(), 3);
            }
            other => panic!("expected public dashboard, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_without_role() {
        let repo = InMemoryRepository::demo();
        let mut portal = Portal::new();
        let err = portal.dispatch(&repo, Action::Approve(1)).unwrap_err();
        assert_eq!(err, PortalError::NoRoleSelected);
    }

    #[test]
    fn test_action_for_wrong_role_is_rejected() {
        let repo = InMemoryRepository::demo();
        let mut portal = Portal::new();
        portal.enter(Role::Public);
        let err = portal.dispatch(&repo, Action::Approve(1)).unwrap_err();
        assert_eq!(
            err,
            PortalError::ActionNotAvailable {
                action: "approve",
                role: Role::Public,
            }
        );
    }

    #[test]
    fn test_dashboard_json_is_tagged_by_view() {
        let repo = InMemoryRepository::demo();
        let mut portal = Portal::new();
        portal.enter(Role::Auditor);
        let json = serde_json::to_value(portal.render(&repo, 2)).unwrap();
        assert_eq!(json["view"], "auditor");
        assert_eq!(json["pending_count"], 2);
    }
}
