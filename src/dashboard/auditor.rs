//! Auditor interface: milestone verification.

use crate::analysis::{approval_rate, verification_queue_amount, verified_amount};
use crate::error::PortalError;
use crate::models::{Amount, VerificationRecord, VerificationRequest, VerificationStatus};
use crate::repository::ProjectRepository;
use serde::Serialize;
use tracing::{debug, info};

use super::Notification;

/// Items an auditor ticks off while reviewing a submission.
pub const CHECKLIST: [&str; 4] = [
    "Documentation completeness",
    "Quality standards compliance",
    "Timeline adherence",
    "Budget alignment",
];

/// A decision taken during this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub id: u32,
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

#[derive(Debug, Clone, Default)]
pub struct AuditorView {
    /// Request open in the review panel.
    selected: Option<u32>,
    checklist: [bool; CHECKLIST.len()],
    notes: String,
    decisions: Vec<Decision>,
}

impl AuditorView {
    /// Open the detailed review panel for a request.
    pub fn review(&mut self, repo: &dyn ProjectRepository, id: u32) -> Result<(), PortalError> {
        self.ensure_undecided(repo, id)?;
        self.close_review();
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    /// Tick or untick a checklist item of the open review.
    pub fn toggle_check(&mut self, index: usize) -> Result<(), PortalError> {
        if self.selected.is_none() {
            return Err(PortalError::NoActiveReview);
        }
        let item = self
            .checklist
            .get_mut(index)
            .ok_or(PortalError::ChecklistIndex(index))?;
        *item = !*item;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: String) -> Result<(), PortalError> {
        if self.selected.is_none() {
            return Err(PortalError::NoActiveReview);
        }
        self.notes = notes;
        Ok(())
    }

    /// Close the review panel without deciding.
    pub fn cancel_review(&mut self) {
        self.close_review();
    }

    pub fn approve(
        &mut self,
        repo: &dyn ProjectRepository,
        id: u32,
    ) -> Result<Notification, PortalError> {
        self.decide(repo, id, VerificationStatus::Approved)
    }

    pub fn reject(
        &mut self,
        repo: &dyn ProjectRepository,
        id: u32,
    ) -> Result<Notification, PortalError> {
        self.decide(repo, id, VerificationStatus::Rejected)
    }

    /// Record a decision. The review panel is closed whatever the outcome.
    fn decide(
        &mut self,
        repo: &dyn ProjectRepository,
        id: u32,
        status: VerificationStatus,
    ) -> Result<Notification, PortalError> {
        let notes = if self.selected == Some(id) {
            std::mem::take(&mut self.notes)
        } else {
            String::new()
        };
        self.close_review();

        self.ensure_undecided(repo, id)?;

        info!("Verification request {} {}", id, status);
        if !notes.is_empty() {
            debug!("Notes for request {}: {}", id, notes);
        }
        self.decisions.push(Decision { id, status, notes });

        Ok(Notification::new(
            format!("Milestone {}", status),
            format!(
                "The milestone has been {} and recorded on the blockchain.",
                status
            ),
        ))
    }

    fn ensure_undecided(&self, repo: &dyn ProjectRepository, id: u32) -> Result<(), PortalError> {
        let request = repo
            .get_verification(id)
            .ok_or(PortalError::UnknownVerification(id))?;
        if request.status.is_terminal() {
            return Err(PortalError::AlreadyDecided {
                id,
                status: request.status,
            });
        }
        if let Some(decision) = self.decisions.iter().find(|d| d.id == id) {
            return Err(PortalError::AlreadyDecided {
                id,
                status: decision.status,
            });
        }
        Ok(())
    }

    fn close_review(&mut self) {
        self.selected = None;
        self.checklist = Default::default();
        self.notes.clear();
    }

    pub fn render(&self, repo: &dyn ProjectRepository) -> AuditorDashboard {
        let queue = repo.pending_verifications();
        let history = repo.verification_history();

        let review = self
            .selected()
            .and_then(|id| repo.get_verification(id))
            .map(|request| ReviewPanel {
                request: request.clone(),
                checklist: CHECKLIST
                    .iter()
                    .zip(self.checklist)
                    .map(|(&label, checked)| ChecklistItem { label, checked })
                    .collect(),
                notes: self.notes.clone(),
            });

        AuditorDashboard {
            pending_count: queue.len(),
            pending_amount: verification_queue_amount(queue.iter().copied()),
            verified_amount: verified_amount(history),
            approval_rate: approval_rate(history),
            queue: queue.into_iter().cloned().collect(),
            history: history.to_vec(),
            decisions: self.decisions.clone(),
            review,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewPanel {
    pub request: VerificationRequest,
    pub checklist: Vec<ChecklistItem>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditorDashboard {
    pub pending_count: usize,
    pub pending_amount: Amount,
    pub verified_amount: Amount,
    pub approval_rate: u8,
    pub queue: Vec<VerificationRequest>,
    pub history: Vec<VerificationRecord>,
    pub decisions: Vec<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewPanel>,
}
