//! Demo data set.

use crate::models::{
    Document, DocumentKind, Milestone, MilestoneStatus, Project, ProjectStatus, Transaction,
    TransactionKind, VerificationRecord, VerificationRequest, VerificationStatus,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal calendar dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn milestone(id: u32, name: &str, status: MilestoneStatus, amount: u64, due: NaiveDate) -> Milestone {
    Milestone {
        id,
        name: name.to_string(),
        status,
        amount,
        due_date: due,
    }
}

fn release(on: NaiveDate, amount: u64, milestone: &str) -> Transaction {
    Transaction {
        date: on,
        amount,
        kind: TransactionKind::FundRelease,
        milestone: milestone.to_string(),
    }
}

fn doc(name: &str, size: &str, kind: DocumentKind) -> Document {
    Document {
        name: name.to_string(),
        size: size.to_string(),
        kind,
    }
}

pub(super) fn projects() -> Vec<Project> {
    use MilestoneStatus::*;

    vec![
        Project {
            id: 1,
            name: "Highway Infrastructure Upgrade".to_string(),
            description: "Major highway improvements including new lanes, drainage systems, and safety barriers".to_string(),
            budget: 5_000_000,
            contractor: "BuildCorp Ltd.".to_string(),
            status: ProjectStatus::InProgress,
            start_date: date(2024, 1, 1),
            expected_completion: date(2024, 8, 15),
            milestones: vec![
                milestone(1, "Site Survey & Planning", Completed, 1_000_000, date(2024, 1, 15)),
                milestone(2, "Foundation Work", Completed, 1_000_000, date(2024, 2, 28)),
                milestone(3, "Infrastructure Installation", InProgress, 1_000_000, date(2024, 4, 15)),
                milestone(4, "Road Surface Construction", Pending, 1_000_000, date(2024, 6, 30)),
                milestone(5, "Final Inspection & Handover", Pending, 1_000_000, date(2024, 8, 15)),
            ],
            transactions: vec![
                release(date(2024, 1, 15), 1_000_000, "Site Survey & Planning"),
                release(date(2024, 2, 28), 1_000_000, "Foundation Work"),
            ],
        },
        Project {
            id: 2,
            name: "School Renovation Program".to_string(),
            description: "Comprehensive renovation of three elementary schools including classroom upgrades and safety improvements".to_string(),
            budget: 2_500_000,
            contractor: "EduBuild Inc.".to_string(),
            status: ProjectStatus::PendingVerification,
            start_date: date(2024, 2, 1),
            expected_completion: date(2024, 5, 15),
            milestones: vec![
                milestone(1, "Structural Assessment", Completed, 833_333, date(2024, 2, 1)),
                milestone(2, "Renovation Phase 1", Submitted, 833_333, date(2024, 3, 30)),
                milestone(3, "Final Completion", Pending, 833_334, date(2024, 5, 15)),
            ],
            transactions: vec![release(date(2024, 2, 1), 833_333, "Structural Assessment")],
        },
        Project {
            id: 3,
            name: "Community Park Development".to_string(),
            description: "Creation of a new 15-acre community park with playground, walking trails, and recreational facilities".to_string(),
            budget: 1_800_000,
            contractor: "GreenSpace Developers".to_string(),
            status: ProjectStatus::Completed,
            start_date: date(2023, 9, 1),
            expected_completion: date(2024, 2, 15),
            milestones: vec![
                milestone(1, "Site Preparation", Completed, 450_000, date(2023, 9, 15)),
                milestone(2, "Infrastructure Installation", Completed, 450_000, date(2023, 11, 1)),
                milestone(3, "Facility Construction", Completed, 450_000, date(2023, 12, 15)),
                milestone(4, "Final Completion", Completed, 450_000, date(2024, 2, 15)),
            ],
            transactions: vec![
                release(date(2023, 9, 15), 450_000, "Site Preparation"),
                release(date(2023, 11, 1), 450_000, "Infrastructure Installation"),
                release(date(2023, 12, 15), 450_000, "Facility Construction"),
                release(date(2024, 2, 15), 450_000, "Final Completion"),
            ],
        },
    ]
}

pub(super) fn pending_verifications() -> Vec<VerificationRequest> {
    vec![
        VerificationRequest {
            id: 1,
            project_id: 1,
            milestone_id: 3,
            project_name: "Highway Infrastructure Upgrade".to_string(),
            milestone_name: "Infrastructure Installation".to_string(),
            contractor_address: "0x742d35Cc6634C0532925a3b8D4C0b321".to_string(),
            amount: 1_000_000,
            submitted_date: date(2024, 3, 15),
            documents: vec![
                doc("Progress_Photos.zip", "15.2 MB", DocumentKind::Images),
                doc("Installation_Report.pdf", "2.8 MB", DocumentKind::Document),
                doc("Quality_Checklist.pdf", "1.2 MB", DocumentKind::Document),
            ],
            description: "Installation of primary infrastructure components including drainage systems and base structures.".to_string(),
            status: VerificationStatus::Pending,
        },
        VerificationRequest {
            id: 2,
            project_id: 2,
            milestone_id: 2,
            project_name: "School Renovation Program".to_string(),
            milestone_name: "Renovation Phase 1".to_string(),
            contractor_address: "0x8ba1f109551bD432803012645Hac189B3c4c0b".to_string(),
            amount: 833_333,
            submitted_date: date(2024, 3, 12),
            documents: vec![
                doc("Before_After_Photos.zip", "22.5 MB", DocumentKind::Images),
                doc("Renovation_Summary.pdf", "3.1 MB", DocumentKind::Document),
            ],
            description: "Completion of classroom renovations, including electrical work and structural improvements.".to_string(),
            status: VerificationStatus::Pending,
        },
    ]
}

pub(super) fn verification_history() -> Vec<VerificationRecord> {
    vec![
        VerificationRecord {
            id: 3,
            project_name: "Highway Infrastructure Upgrade".to_string(),
            milestone_name: "Foundation Work".to_string(),
            status: VerificationStatus::Approved,
            verified_date: date(2024, 3, 10),
            amount: 1_000_000,
        },
        VerificationRecord {
            id: 4,
            project_name: "Community Center Construction".to_string(),
            milestone_name: "Site Preparation".to_string(),
            status: VerificationStatus::Approved,
            verified_date: date(2024, 3, 8),
            amount: 500_000,
        },
    ]
}
