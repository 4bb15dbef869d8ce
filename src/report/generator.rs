//! Markdown and JSON report generation.
//!
//! This module turns a rendered [`Dashboard`] into text. Markdown output
//! mirrors the cards, lists and panels of each dashboard; JSON output is
//! the serialized report.

use super::{Report, ReportMetadata};
use crate::dashboard::{
    AuditorDashboard, ContractorDashboard, Dashboard, GovernmentDashboard, Notification,
    PublicDashboard, RoleSelector,
};
use crate::models::{Amount, Role, VerificationStatus};
use anyhow::Result;

/// Format an amount with thousands separators, e.g. `$1,000,000`.
pub fn format_amount(amount: Amount, symbol: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", symbol, grouped)
}

/// Ten-cell progress bar followed by the percentage.
fn progress_bar(percent: u8) -> String {
    let filled = (percent.min(100) / 10) as usize;
    format!(
        "`{}{}` {}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        percent
    )
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, currency: &str) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("# LedgerView: {}\n\n", title(&report.dashboard)));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_notifications_section(&report.notifications));

    let body = match &report.dashboard {
        Dashboard::Selector(selector) => generate_selector_section(selector),
        Dashboard::Government(dash) => generate_government_section(dash, currency),
        Dashboard::Contractor(dash) => generate_contractor_section(dash, currency),
        Dashboard::Auditor(dash) => generate_auditor_section(dash, currency),
        Dashboard::Public(dash) => generate_public_section(dash, currency),
    };
    output.push_str(&body);

    output.push_str(&generate_warnings_section(&report.warnings));
    output.push_str(&generate_footer());

    output
}

fn title(dashboard: &Dashboard) -> &'static str {
    match dashboard {
        Dashboard::Selector(_) => "Government Transparency Portal",
        Dashboard::Government(_) => Role::Government.title(),
        Dashboard::Contractor(_) => Role::Contractor.title(),
        Dashboard::Auditor(_) => Role::Auditor.title(),
        Dashboard::Public(_) => Role::Public.title(),
    }
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Data Source:** {}\n", metadata.data_source));
    if let Some(role) = metadata.role {
        section.push_str(&format!("- **Role:** {} {}\n", role.emoji(), role));
    }
    section.push('\n');

    section
}

fn generate_notifications_section(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = notifications
        .iter()
        .map(|note| format!("> 🔔 **{}** {}", note.title, note.description))
        .collect();

    format!("## Notifications\n\n{}\n\n", quoted.join("\n>\n"))
}

fn generate_selector_section(selector: &RoleSelector) -> String {
    let mut section = String::new();

    section.push_str(
        "Blockchain-powered transparency for government project funding and milestone tracking.\n\n",
    );
    section.push_str("## Select Your Role\n\n");
    for card in &selector.roles {
        section.push_str(&format!(
            "- {} **{}** (`ledgerview {}`): {}\n",
            card.role.emoji(),
            card.title,
            card.role,
            card.description
        ));
    }
    section.push('\n');

    section
}

fn generate_government_section(dash: &GovernmentDashboard, currency: &str) -> String {
    let mut section = String::new();
    let summary = &dash.summary;

    section.push_str("## Overview\n\n");
    section.push_str("| Total Budget Allocated | Active Projects | Verified Contractors | Funds Released |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} ({}% of total budget) |\n\n",
        format_amount(summary.total_budget, currency),
        dash.active_projects,
        dash.contractors,
        format_amount(summary.funds_released, currency),
        summary.release_percentage
    ));

    section.push_str("## Projects\n\n");
    if dash.projects.is_empty() {
        section.push_str("No projects have been created yet.\n\n");
    }
    for project in &dash.projects {
        section.push_str(&format!("### {}\n\n", project.name));
        section.push_str(&format!(
            "*Contractor: {}* | {}\n\n",
            project.contractor, project.badge
        ));
        section.push_str(&format!(
            "- **Budget:** {}\n",
            format_amount(project.budget, currency)
        ));
        section.push_str(&format!(
            "- **Progress:** {}/{} milestones\n",
            project.completed_milestones, project.total_milestones
        ));
        section.push_str(&format!(
            "- **Funds Released:** {}\n\n",
            format_amount(project.funds_released, currency)
        ));
        section.push_str(&format!("{}\n\n", progress_bar(project.progress)));
    }

    if dash.create_form_open {
        section.push_str("## Create New Project\n\n");
        section.push_str("The project form is open. Required: project name, budget, contractor address, number of milestones.\n\n");
    }

    section
}

fn generate_contractor_section(dash: &ContractorDashboard, currency: &str) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str("| Total Earned | Pending Payment | Active Projects |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} |\n\n",
        format_amount(dash.earned, currency),
        format_amount(dash.pending, currency),
        dash.active_projects
    ));

    section.push_str("## Projects and Milestones\n\n");
    for project in &dash.projects {
        section.push_str(&format!("### {}\n\n", project.name));
        section.push_str(&format!(
            "*Total Budget: {} | {} / {} Complete*\n\n",
            format_amount(project.budget, currency),
            project.completed_milestones,
            project.total_milestones
        ));

        section.push_str("| # | Milestone | Status | Due | Amount | Action |\n");
        section.push_str("|:---:|:---|:---|:---:|---:|:---|\n");
        for milestone in &project.milestones {
            let action = if milestone.submitted_this_session {
                "📤 Submitted"
            } else if milestone.can_submit {
                "Submit for verification"
            } else {
                ""
            };
            section.push_str(&format!(
                "| {} | {} {} | {} | {} | {} | {} |\n",
                milestone.id,
                milestone.badge.icon,
                milestone.name,
                milestone.badge,
                milestone.due_date,
                format_amount(milestone.amount, currency),
                action
            ));
        }
        section.push('\n');
    }

    section
}

fn generate_auditor_section(dash: &AuditorDashboard, currency: &str) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str("| Pending Verifications | Total Verified | Verification Rate |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} ({} awaiting review) | {} | {}% |\n\n",
        dash.pending_count,
        format_amount(dash.pending_amount, currency),
        format_amount(dash.verified_amount, currency),
        dash.approval_rate
    ));

    section.push_str("## Pending Verifications\n\n");
    if dash.queue.is_empty() {
        section.push_str("Nothing is waiting for review.\n\n");
    }
    for request in &dash.queue {
        section.push_str(&format!(
            "### #{} {}: {}\n\n",
            request.id, request.project_name, request.milestone_name
        ));
        section.push_str(&format!("*{}*\n\n", request.status.badge()));
        section.push_str(&format!("- **Contractor:** `{}`\n", request.contractor_address));
        section.push_str(&format!(
            "- **Submitted:** {} | **Amount:** {}\n",
            request.submitted_date,
            format_amount(request.amount, currency)
        ));
        if !request.description.is_empty() {
            section.push_str(&format!("- **Description:** {}\n", request.description));
        }
        for doc in &request.documents {
            section.push_str(&format!(
                "  - {} {} ({})\n",
                doc.kind.emoji(),
                doc.name,
                doc.size
            ));
        }
        section.push('\n');
    }

    if !dash.history.is_empty() {
        section.push_str("## Recent Verifications\n\n");
        section.push_str("| Project | Milestone | Verified | Amount | Status |\n");
        section.push_str("|:---|:---|:---:|---:|:---|\n");
        for record in &dash.history {
            section.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                record.project_name,
                record.milestone_name,
                record.verified_date,
                format_amount(record.amount, currency),
                record.status.badge()
            ));
        }
        section.push('\n');
    }

    if !dash.decisions.is_empty() {
        section.push_str("## Decisions This Session\n\n");
        for decision in &dash.decisions {
            let verb = match decision.status {
                VerificationStatus::Approved => "approved, funds released",
                VerificationStatus::Rejected => "rejected",
                VerificationStatus::Pending => "pending",
            };
            section.push_str(&format!(
                "- {} Request #{} {}\n",
                decision.status.badge().icon,
                decision.id,
                verb
            ));
            if !decision.notes.is_empty() {
                section.push_str(&format!("  - Notes: {}\n", decision.notes));
            }
        }
        section.push('\n');
    }

    if let Some(ref panel) = dash.review {
        section.push_str("## Milestone Verification\n\n");
        section.push_str(&format!(
            "Reviewing #{} {}: {}\n\n",
            panel.request.id, panel.request.project_name, panel.request.milestone_name
        ));
        section.push_str("### Verification Checklist\n\n");
        for item in &panel.checklist {
            let mark = if item.checked { "x" } else { " " };
            section.push_str(&format!("- [{}] {}\n", mark, item.label));
        }
        section.push('\n');
        if !panel.notes.is_empty() {
            section.push_str(&format!("**Notes:** {}\n\n", panel.notes));
        }
    }

    section
}

fn generate_public_section(dash: &PublicDashboard, currency: &str) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str("| Total Budget | Funds Released | Total Projects |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} ({}% of total budget) | {} ({} completed) |\n\n",
        format_amount(dash.total_budget, currency),
        format_amount(dash.funds_released, currency),
        dash.release_percentage,
        dash.project_count,
        dash.completed_projects
    ));

    if dash.search_term.is_empty() {
        section.push_str("## Projects\n\n");
    } else {
        section.push_str(&format!("## Projects matching \"{}\"\n\n", dash.search_term));
    }

    if dash.no_results {
        section.push_str("### No projects found\n\n");
        section.push_str("Try adjusting your search terms.\n\n");
        return section;
    }

    for card in &dash.results {
        section.push_str(&format!("### {}\n\n", card.name));
        section.push_str(&format!("*{}*\n\n", card.badge));
        if !card.description.is_empty() {
            section.push_str(&format!("{}\n\n", card.description));
        }
        section.push_str(&format!(
            "- **Contractor:** {}\n- **Start Date:** {}\n- **Expected Completion:** {}\n",
            card.contractor, card.start_date, card.expected_completion
        ));
        section.push_str(&format!(
            "- **Budget:** {} | **Released:** {} | **Remaining:** {}\n",
            format_amount(card.budget, currency),
            format_amount(card.funds_released, currency),
            format_amount(card.remaining, currency)
        ));
        section.push_str(&format!(
            "- **Milestones:** {}/{} {}\n",
            card.completed_milestones,
            card.total_milestones,
            progress_bar(card.progress)
        ));

        if !card.recent_transactions.is_empty() {
            section.push_str("- **Recent Transactions:**\n");
            for tx in &card.recent_transactions {
                section.push_str(&format!(
                    "  - {} {} {} ({})\n",
                    tx.date,
                    tx.kind,
                    format_amount(tx.amount, currency),
                    tx.milestone
                ));
            }
        }
        section.push('\n');
    }

    section
}

fn generate_warnings_section(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Data Consistency Warnings\n\n");
    for warning in warnings {
        section.push_str(&format!("- ⚠️ {}\n", warning));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Figures are derived from recorded milestones and fund releases. Generated by LedgerView.*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
