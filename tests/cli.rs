use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("ledgerview").unwrap();
    cmd.env_remove("LEDGERVIEW_DATA").arg("--quiet");
    cmd
}

const UNBALANCED_DATA: &str = r#"
[[projects]]
id = 1
name = "Bridge Repair"
description = "Deck and railing replacement"
budget = 1000000
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
"#;

const DECIDED_REQUEST_DATA: &str = r#"
[[verifications]]
id = 1
project_id = 1
milestone_id = 2
project_name = "Bridge Repair"
milestone_name = "Deck"
contractor_address = "0xabc"
amount = 400000
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
"#;

#[test]
fn selector_without_role() {
    cmd()
        .assert()
        .success()
        .stdout(contains("Select Your Role"))
        .stdout(contains("`ledgerview contractor`"));
}

#[test]
fn public_search_is_case_insensitive() {
    cmd()
        .args(["public", "--search", "HIGHWAY"])
        .assert()
        .success()
        .stdout(contains("### Highway Infrastructure Upgrade"))
        .stdout(contains("School Renovation Program").not())
        .stdout(contains("No projects found").not());
}

#[test]
fn public_search_without_match() {
    cmd()
        .args(["public", "--search", "zzz-no-match"])
        .assert()
        .success()
        .stdout(contains("No projects found"));
}

#[test]
fn auditor_approval_closes_review() {
    cmd()
        .args(["auditor", "--review", "1", "--check", "1", "--approve", "1"])
        .assert()
        .success()
        .stdout(contains("Milestone approved"))
        .stdout(contains("## Milestone Verification").not());
}

#[test]
fn auditor_review_panel_stays_open() {
    cmd()
        .args(["auditor", "--review", "2", "--check", "3", "--notes", "Need invoices"])
        .assert()
        .success()
        .stdout(contains("- [x] Timeline adherence"))
        .stdout(contains("Need invoices"));
}

#[test]
fn auditor_cancel_closes_review() {
    cmd()
        .args(["auditor", "--review", "2", "--notes", "draft", "--cancel"])
        .assert()
        .success()
        .stdout(contains("## Milestone Verification").not())
        .stdout(contains("Milestone approved").not());
}

#[test]
fn contractor_cannot_submit_completed_milestone() {
    cmd()
        .args(["contractor", "--submit", "1:1"])
        .assert()
        .code(1)
        .stderr(contains("only in-progress milestones can be submitted"));
}

#[test]
fn contractor_submits_in_progress_milestone() {
    cmd()
        .args(["contractor", "--submit", "1:3"])
        .assert()
        .success()
        .stdout(contains("Milestone Submitted"));
}

#[test]
fn action_outside_its_view_is_rejected() {
    cmd()
        .args(["public", "--approve", "1"])
        .assert()
        .code(1)
        .stderr(contains("approve is not available in the public view"));
}

#[test]
fn government_create_requires_fields() {
    cmd()
        .args(["government", "--create", "Harbor Dredging", "--budget", "3000000"])
        .assert()
        .code(1)
        .stderr(contains("required field missing: contractor address"));
}

#[test]
fn government_json_report() {
    let out = cmd()
        .args([
            "government",
            "--format",
            "json",
            "--create",
            "Harbor Dredging",
            "--budget",
            "3000000",
            "--contractor",
            "0x742d35Cc",
            "--milestones",
            "4",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(json["dashboard"]["view"], "government");
    assert_eq!(json["dashboard"]["summary"]["total_budget"], 9_300_000);
    assert_eq!(json["dashboard"]["summary"]["funds_released"], 4_633_333);
    assert_eq!(
        json["notifications"][0]["title"],
        "Project Created Successfully"
    );
}

#[test]
fn strict_mode_fails_on_inconsistent_data() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("projects.toml");
    fs::write(&data, UNBALANCED_DATA).unwrap();

    cmd()
        .args(["public", "--strict", "--data"])
        .arg(&data)
        .assert()
        .code(2)
        .stdout(contains("## Data Consistency Warnings"))
        .stdout(contains("Bridge Repair: milestone amounts total 300000 but budget is 1000000"));
}

#[test]
fn data_file_from_environment() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("projects.toml");
    fs::write(&data, UNBALANCED_DATA).unwrap();

    cmd()
        .env("LEDGERVIEW_DATA", &data)
        .arg("public")
        .assert()
        .success()
        .stdout(contains("Bridge Repair"))
        .stdout(contains("Highway").not());
}

#[test]
fn missing_data_file_is_rejected() {
    cmd()
        .args(["public", "--data", "does/not/exist.toml"])
        .assert()
        .code(1)
        .stderr(contains("Data file does not exist"));
}

#[test]
fn report_written_to_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("report.md");

    cmd()
        .args(["contractor", "--output"])
        .arg(&out)
        .assert()
        .success();

    let report = fs::read_to_string(&out).unwrap();
    assert!(report.contains("# LedgerView: Contractor Dashboard"));
    assert!(report.contains("$2,833,333"));
}

#[test]
fn config_file_sets_role_and_currency() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("portal.toml");
    fs::write(
        &config,
        "[general]\ndefault_role = \"public\"\n\n[display]\ncurrency_symbol = \"€\"\n",
    )
    .unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("# LedgerView: Public Transparency"))
        .stdout(contains("€9,300,000"));
}

#[test]
fn init_config_writes_default_file() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .current_dir(tmp.path())
        .arg("--init-config")
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join(".ledgerview.toml")).unwrap();
    assert!(content.contains("[display]"));

    cmd()
        .current_dir(tmp.path())
        .arg("--init-config")
        .assert()
        .code(1);
}

#[test]
fn recorded_rejection_cannot_be_approved() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("requests.toml");
    fs::write(&data, DECIDED_REQUEST_DATA).unwrap();

    cmd()
        .args(["auditor", "--approve", "1", "--data"])
        .arg(&data)
        .assert()
        .code(1)
        .stderr(contains("verification request 1 was already rejected"));

    let out = cmd()
        .args(["auditor", "--format", "json", "--data"])
        .arg(&data)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(json["dashboard"]["pending_count"], 1);
    assert_eq!(json["dashboard"]["pending_amount"], 250_000);
    assert_eq!(json["dashboard"]["queue"][0]["id"], 2);
}

#[test]
fn verbose_setting_in_config_enables_debug_logs() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".ledgerview.toml"),
        "[general]\ndefault_role = \"public\"\nverbose = true\n",
    )
    .unwrap();

    let mut verbose = Command::cargo_bin("ledgerview").unwrap();
    verbose
        .env_remove("LEDGERVIEW_DATA")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(contains("Entering public view"));

    cmd()
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(contains("Entering public view").not());
}
