//! Errors raised by dashboard actions.

use crate::models::{MilestoneStatus, Role, VerificationStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    #[error("project {0} not found")]
    UnknownProject(u32),

    #[error("milestone {milestone_id} not found in project {project_id}")]
    UnknownMilestone { project_id: u32, milestone_id: u32 },

    #[error("verification request {0} not found")]
    UnknownVerification(u32),

    #[error("milestone '{name}' is {status}; only in-progress milestones can be submitted")]
    MilestoneNotSubmittable {
        name: String,
        status: MilestoneStatus,
    },

    #[error("milestone {milestone_id} of project {project_id} was already submitted")]
    AlreadySubmitted { project_id: u32, milestone_id: u32 },

    #[error("verification request {id} was already {status}")]
    AlreadyDecided { id: u32, status: VerificationStatus },

    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("checklist item {0} does not exist")]
    ChecklistIndex(usize),

    #[error("no verification request is open for review")]
    NoActiveReview,

    #[error("{action} is not available in the {role} view")]
    ActionNotAvailable { action: &'static str, role: Role },

    #[error("no role selected")]
    NoRoleSelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PortalError::MilestoneNotSubmittable {
            name: "Foundation Work".to_string(),
            status: MilestoneStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "milestone 'Foundation Work' is Completed; only in-progress milestones can be submitted"
        );

        let err = PortalError::ActionNotAvailable {
            action: "approve",
            role: Role::Public,
        };
        assert_eq!(err.to_string(), "approve is not available in the public view");
    }
}
