//! Public transparency view: read-only search over all projects.

use crate::analysis::{
    completed_milestones, filter_by_search, funds_released, project_funds_released,
    project_progress, recent_transactions, release_ratio, remaining_budget, total_budget,
};
use crate::models::{Amount, Badge, Project, ProjectStatus, Transaction};
use crate::repository::ProjectRepository;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct PublicView {
    search_term: String,
}

impl PublicView {
    pub fn set_search(&mut self, term: String) {
        self.search_term = term;
    }

    /// Projects matching the current search, in repository order.
    pub fn filtered<'a>(&self, repo: &'a dyn ProjectRepository) -> Vec<&'a Project> {
        filter_by_search(repo.list_projects(), &self.search_term).collect()
    }

    /// Whether the "no projects found" state is shown.
    pub fn shows_no_results(&self, repo: &dyn ProjectRepository) -> bool {
        filter_by_search(repo.list_projects(), &self.search_term)
            .next()
            .is_none()
    }

    pub fn render(&self, repo: &dyn ProjectRepository, recent: usize) -> PublicDashboard {
        let projects = repo.list_projects();
        let results: Vec<PublicProjectCard> = self
            .filtered(repo)
            .into_iter()
            .map(|p| PublicProjectCard::new(p, recent))
            .collect();

        PublicDashboard {
            total_budget: total_budget(projects),
            funds_released: funds_released(projects),
            release_percentage: release_ratio(projects),
            project_count: projects.len(),
            completed_projects: projects
                .iter()
                .filter(|p| p.status == ProjectStatus::Completed)
                .count(),
            search_term: self.search_term.clone(),
            no_results: self.shows_no_results(repo),
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicProjectCard {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub contractor: String,
    pub start_date: NaiveDate,
    pub expected_completion: NaiveDate,
    pub status: ProjectStatus,
    pub badge: Badge,
    pub budget: Amount,
    pub funds_released: Amount,
    pub remaining: Amount,
    pub completed_milestones: usize,
    pub total_milestones: usize,
    pub progress: u8,
    pub recent_transactions: Vec<Transaction>,
}

impl PublicProjectCard {
    fn new(project: &Project, recent: usize) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            contractor: project.contractor.clone(),
            start_date: project.start_date,
            expected_completion: project.expected_completion,
            status: project.status,
            badge: project.status.badge(),
            budget: project.budget,
            funds_released: project_funds_released(project),
            remaining: remaining_budget(project),
            completed_milestones: completed_milestones(project),
            total_milestones: project.milestones.len(),
            progress: project_progress(project),
            recent_transactions: recent_transactions(project, recent)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicDashboard {
    pub total_budget: Amount,
    pub funds_released: Amount,
    pub release_percentage: u8,
    pub project_count: usize,
    pub completed_projects: usize,
    pub search_term: String,
    pub results: Vec<PublicProjectCard>,
    /// True exactly when `results` is empty.
    pub no_results: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;

    #[test]
    fn test_empty_search_lists_everything() {
        let repo = InMemoryRepository::demo();
        let view = PublicView::default();
        let ids: Vec<u32> = view.filtered(&repo).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!view.shows_no_results(&repo));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let repo = InMemoryRepository::demo();
        let mut view = PublicView::default();
        view.set_search("HIGHWAY".to_string());
        let found = view.filtered(&repo);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Highway Infrastructure Upgrade");
    }

    #[test]
    fn test_no_results_state() {
        let repo = InMemoryRepository::demo();
        let mut view = PublicView::default();
        view.set_search("zzz-no-match".to_string());
        assert!(view.filtered(&repo).is_empty());
        assert!(view.shows_no_results(&repo));

        let dash = view.render(&repo, 2);
        assert!(dash.no_results);
        assert!(dash.results.is_empty());
        // Overall figures ignore the search.
        assert_eq!(dash.project_count, 3);
        assert_eq!(dash.total_budget, 9_300_000);
    }

    #[test]
    fn test_render_cards() {
        let repo = InMemoryRepository::demo();
        let dash = PublicView::default().render(&repo, 2);

        assert_eq!(dash.funds_released, 4_633_333);
        assert_eq!(dash.release_percentage, 50);
        assert_eq!(dash.completed_projects, 1);
        assert!(!dash.no_results);

        let park = &dash.results[2];
        assert_eq!(park.remaining, 0);
        assert_eq!(park.progress, 100);
        assert_eq!(park.recent_transactions.len(), 2);

        let school = &dash.results[1];
        assert_eq!(school.remaining, 2_500_000 - 833_333);
        assert_eq!(school.progress, 33);
    }
}
