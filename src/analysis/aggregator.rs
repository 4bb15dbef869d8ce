//! Budget aggregation and progress statistics.
//!
//! This module provides the figures shown on the dashboard summary cards.
//! Every derived value is recomputed from the underlying records:
//! funds released come from transactions, completed milestone counts come
//! from milestone statuses.

use crate::models::{
    Amount, MilestoneStatus, Project, ProjectStatus, Transaction, TransactionKind,
    VerificationRecord, VerificationRequest, VerificationStatus,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Sum of amounts, stopping at `Amount::MAX` instead of overflowing.
pub fn sum_amounts<I>(amounts: I) -> Amount
where
    I: IntoIterator<Item = Amount>,
{
    amounts.into_iter().fold(0, Amount::saturating_add)
}

/// Sum of every project's allocated budget.
pub fn total_budget(projects: &[Project]) -> Amount {
    sum_amounts(projects.iter().map(|p| p.budget))
}

/// Funds released for one project: the sum of its fund-release transactions.
pub fn project_funds_released(project: &Project) -> Amount {
    sum_amounts(
        project
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::FundRelease)
            .map(|t| t.amount),
    )
}

/// Funds released across all projects.
pub fn funds_released(projects: &[Project]) -> Amount {
    sum_amounts(projects.iter().map(project_funds_released))
}

/// Budget not yet released. Never negative.
pub fn remaining_budget(project: &Project) -> Amount {
    project.budget.saturating_sub(project_funds_released(project))
}

/// `part / whole * 100`, rounded half up and capped at 100.
///
/// Returns 0 when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }

    let part = part.min(whole) as u128;
    let whole = whole as u128;
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// Share of milestones completed, as a whole percentage in `[0, 100]`.
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    percentage(completed as u64, total as u64)
}

/// Number of milestones with status `completed`.
pub fn completed_milestones(project: &Project) -> usize {
    project
        .milestones
        .iter()
        .filter(|m| m.status == MilestoneStatus::Completed)
        .count()
}

/// Milestone completion of a single project.
pub fn project_progress(project: &Project) -> u8 {
    completion_percentage(completed_milestones(project), project.milestones.len())
}

/// Share of the total budget that has been released.
pub fn release_ratio(projects: &[Project]) -> u8 {
    percentage(funds_released(projects), total_budget(projects))
}

/// Projects whose name or description contains `term`, ignoring case.
///
/// An empty term matches everything. The returned iterator is lazy,
/// preserves input order and can be cloned to restart it.
pub fn filter_by_search<'a>(
    projects: &'a [Project],
    term: &str,
) -> impl Iterator<Item = &'a Project> + Clone + 'a {
    let needle = term.trim().to_lowercase();

    projects.iter().filter(move |p| {
        needle.is_empty()
            || p.name.to_lowercase().contains(&needle)
            || p.description.to_lowercase().contains(&needle)
    })
}

/// Sum of milestone amounts, across all projects, whose status satisfies `pred`.
pub fn milestone_amount_where<F>(projects: &[Project], pred: F) -> Amount
where
    F: Fn(MilestoneStatus) -> bool,
{
    sum_amounts(
        projects
            .iter()
            .flat_map(|p| &p.milestones)
            .filter(|m| pred(m.status))
            .map(|m| m.amount),
    )
}

/// Amount earned on completed milestones.
pub fn earned_amount(projects: &[Project]) -> Amount {
    milestone_amount_where(projects, |s| s == MilestoneStatus::Completed)
}

/// Amount submitted and waiting for verification.
pub fn pending_amount(projects: &[Project]) -> Amount {
    milestone_amount_where(projects, |s| s == MilestoneStatus::Submitted)
}

/// Project count per status. Every status is present, possibly with zero.
pub fn count_by_status(projects: &[Project]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = ProjectStatus::ALL
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();

    for project in projects {
        *counts.entry(project.status.to_string()).or_default() += 1;
    }

    counts
}

/// The last `n` transactions of a project, oldest first.
pub fn recent_transactions(project: &Project, n: usize) -> Vec<&Transaction> {
    let mut txs: Vec<&Transaction> = project.transactions.iter().collect();
    txs.sort_by_key(|t| t.date);
    let skip = txs.len().saturating_sub(n);
    txs.into_iter().skip(skip).collect()
}

/// Total amount awaiting auditor review. Requests already decided are skipped.
pub fn verification_queue_amount<'a, I>(requests: I) -> Amount
where
    I: IntoIterator<Item = &'a VerificationRequest>,
{
    sum_amounts(
        requests
            .into_iter()
            .filter(|r| r.status == VerificationStatus::Pending)
            .map(|r| r.amount),
    )
}

/// Total amount an auditor has approved.
pub fn verified_amount(records: &[VerificationRecord]) -> Amount {
    sum_amounts(
        records
            .iter()
            .filter(|r| r.status == VerificationStatus::Approved)
            .map(|r| r.amount),
    )
}

/// Share of decided verifications that were approved.
pub fn approval_rate(records: &[VerificationRecord]) -> u8 {
    let decided = records.iter().filter(|r| r.status.is_terminal()).count();
    let approved = records
        .iter()
        .filter(|r| r.status == VerificationStatus::Approved)
        .count();
    completion_percentage(approved, decided)
}

/// Figures shown on the summary cards of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    pub projects: usize,
    pub total_budget: Amount,
    pub funds_released: Amount,
    /// Percentage of the budget released.
    pub release_percentage: u8,
    pub milestones: usize,
    pub completed_milestones: usize,
    /// Completed milestone amounts.
    pub earned: Amount,
    /// Submitted milestone amounts.
    pub awaiting_verification: Amount,
    pub by_status: BTreeMap<String, usize>,
}

impl PortfolioSummary {
    /// Computes the summary from a list of projects.
    pub fn from_projects(projects: &[Project]) -> Self {
        Self {
            projects: projects.len(),
            total_budget: total_budget(projects),
            funds_released: funds_released(projects),
            release_percentage: release_ratio(projects),
            milestones: projects.iter().map(|p| p.milestones.len()).sum(),
            completed_milestones: projects.iter().map(completed_milestones).sum(),
            earned: earned_amount(projects),
            awaiting_verification: pending_amount(projects),
            by_status: count_by_status(projects),
        }
    }

    /// Projects with the given status.
    pub fn count(&self, status: ProjectStatus) -> usize {
        self.by_status.get(&status.to_string()).copied().unwrap_or(0)
    }
}

/// A record-level inconsistency found by [`check_consistency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyWarning {
    /// Milestone amounts do not add up to the project budget.
    BudgetMismatch {
        project: String,
        budget: Amount,
        milestones: Amount,
    },
    /// More was released than budgeted.
    OverReleased {
        project: String,
        budget: Amount,
        released: Amount,
    },
    DuplicateMilestoneId { project: String, id: u32 },
    /// A transaction references a milestone the project does not have.
    UnknownMilestone { project: String, milestone: String },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::BudgetMismatch {
                project,
                budget,
                milestones,
            } => write!(
                f,
                "{}: milestone amounts total {} but budget is {}",
                project, milestones, budget
            ),
            ConsistencyWarning::OverReleased {
                project,
                budget,
                released,
            } => write!(
                f,
                "{}: released {} exceeds budget {}",
                project, released, budget
            ),
            ConsistencyWarning::DuplicateMilestoneId { project, id } => {
                write!(f, "{}: milestone id {} is used more than once", project, id)
            }
            ConsistencyWarning::UnknownMilestone { project, milestone } => write!(
                f,
                "{}: transaction for unknown milestone '{}'",
                project, milestone
            ),
        }
    }
}

/// Check one project's records against each other.
pub fn check_consistency(project: &Project) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();

    let milestone_total = sum_amounts(project.milestones.iter().map(|m| m.amount));
    if !project.milestones.is_empty() && milestone_total != project.budget {
        warnings.push(ConsistencyWarning::BudgetMismatch {
            project: project.name.clone(),
            budget: project.budget,
            milestones: milestone_total,
        });
    }

    let released = project_funds_released(project);
    if released > project.budget {
        warnings.push(ConsistencyWarning::OverReleased {
            project: project.name.clone(),
            budget: project.budget,
            released,
        });
    }

    let mut seen = HashSet::new();
    for milestone in &project.milestones {
        if !seen.insert(milestone.id) {
            warnings.push(ConsistencyWarning::DuplicateMilestoneId {
                project: project.name.clone(),
                id: milestone.id,
            });
        }
    }

    for tx in &project.transactions {
        if !project.milestones.iter().any(|m| m.name == tx.milestone) {
            warnings.push(ConsistencyWarning::UnknownMilestone {
                project: project.name.clone(),
                milestone: tx.milestone.clone(),
            });
        }
    }

    warnings
}

/// Consistency warnings for every project.
pub fn check_all(projects: &[Project]) -> Vec<ConsistencyWarning> {
    projects.iter().flat_map(check_consistency).collect()
}
