//! Integration tests for the analysis commands via CLI.
//!
//! These tests verify that the command surface works end to end:
//! - `sx analyze/phase/health/metrics/activity` against a dataset file
//! - JSON and human-readable output formats
//! - dataset resolution via flag, env var, and stdin
//! - error reporting for missing datasets and unknown projects

mod common;

use chrono::{Duration, Utc};
use common::TestEnv;
use predicates::prelude::*;

/// Ten tasks, nine done, one pending, no high priority: classifies as the
/// testing phase with on-time health.
fn testing_phase_dataset() -> serde_json::Value {
    let now = Utc::now();
    let created = (now - Duration::days(40)).to_rfc3339();
    let task_created = (now - Duration::days(30)).to_rfc3339();
    let task_updated = (now - Duration::days(2)).to_rfc3339();

    let mut tasks: Vec<serde_json::Value> = (0..9)
        .map(|i| {
            serde_json::json!({
                "id": format!("t-{i}"),
                "title": format!("Feature {i}"),
                "project_id": "p-1",
                "status": "done",
                "created_at": task_created,
                "updated_at": task_updated,
            })
        })
        .collect();
    tasks.push(serde_json::json!({
        "id": "t-9",
        "title": "Wrap up",
        "project_id": "p-1",
        "status": "pending",
        "created_at": task_created,
        "updated_at": task_updated,
    }));

    serde_json::json!({
        "projects": [{"id": "p-1", "name": "Demo", "created_at": created}],
        "tasks": tasks,
    })
}

/// One overdue high-priority task (Spanish "alta" priority spelling).
fn delayed_dataset() -> serde_json::Value {
    let now = Utc::now();
    serde_json::json!({
        "projects": [{"id": "p-1", "name": "Late", "created_at": (now - Duration::days(10)).to_rfc3339()}],
        "tasks": [
            {
                "id": "t-1",
                "title": "Entrega final",
                "project_id": "p-1",
                "status": "pendiente",
                "priority": "alta",
                "due_date": (now - Duration::days(1)).to_rfc3339(),
                "created_at": (now - Duration::days(9)).to_rfc3339(),
                "updated_at": (now - Duration::days(9)).to_rfc3339()
            }
        ]
    })
}

#[test]
fn test_analyze_json_output() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "analyze", "p-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase\":\"testing\""))
        .stdout(predicate::str::contains("\"health\":\"on_time\""))
        .stdout(predicate::str::contains("\"confidence\":80"))
        .stdout(predicate::str::contains("\"overall_progress\":90"))
        .stdout(predicate::str::contains("\"explanation\""));
}

#[test]
fn test_analyze_human_output() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "analyze", "p-1", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project:  p-1 (Demo)"))
        .stdout(predicate::str::contains("Phase:    testing"))
        .stdout(predicate::str::contains("Reasons:"));
}

#[test]
fn test_phase_command_spanish_locale() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "phase", "p-1", "--locale", "es"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase_name\":\"Pruebas\""));
}

#[test]
fn test_health_delayed_on_overdue_high_priority() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &delayed_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "health", "p-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"health\":\"delayed\""))
        .stdout(predicate::str::contains("\"trend\":\"down\""))
        .stdout(predicate::str::contains("\"overdue_tasks\":1"));
}

#[test]
fn test_metrics_command() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "metrics", "p-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_tasks\":10"))
        .stdout(predicate::str::contains("\"completed_tasks\":9"))
        .stdout(predicate::str::contains("\"completion_rate\":90.0"));
}

#[test]
fn test_activity_command() {
    let env = TestEnv::new();
    let now = Utc::now();
    let data = env.write_dataset(
        "export.json",
        &serde_json::json!({
            "projects": [{"id": "p-1", "name": "Demo", "created_at": (now - Duration::days(10)).to_rfc3339()}],
            "tasks": [
                {
                    "id": "t-1",
                    "title": "Pruebas de la API",
                    "project_id": "p-1",
                    "status": "in_progress",
                    "assignees": [{"id": "u-1", "name": "Ana"}],
                    "created_at": (now - Duration::days(5)).to_rfc3339(),
                    "updated_at": (now - Duration::minutes(10)).to_rfc3339()
                }
            ]
        }),
    );

    env.sx()
        .args(["-d", data.to_str().unwrap(), "activity", "p-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":1"))
        .stdout(predicate::str::contains("\"name\":\"Ana\""))
        .stdout(predicate::str::contains("\"recency\":\"active\""))
        .stdout(predicate::str::contains("\"phase\":\"testing\""));
}

#[test]
fn test_projects_listing_is_default_command() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "projects"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"p-1\""))
        .stdout(predicate::str::contains("\"total_tasks\":10"));

    // No subcommand behaves the same
    env.sx()
        .args(["-d", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"p-1\""));
}

#[test]
fn test_dataset_from_env_var() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .env("SX_DATA", data.to_str().unwrap())
        .args(["phase", "p-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase\":\"testing\""));
}

#[test]
fn test_dataset_from_stdin() {
    let env = TestEnv::new();

    env.sx()
        .args(["-d", "-", "phase", "p-1"])
        .write_stdin(testing_phase_dataset().to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase\":\"testing\""));
}

#[test]
fn test_missing_dataset_errors() {
    let env = TestEnv::new();

    env.sx()
        .args(["-d", "missing.json", "analyze", "p-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dataset not found"));
}

#[test]
fn test_unknown_project_errors() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "analyze", "p-404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found: p-404"));
}

#[test]
fn test_unknown_project_human_error() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "analyze", "p-404", "-H"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: project not found"));
}

#[test]
fn test_invalid_locale_errors() {
    let env = TestEnv::new();
    let data = env.write_dataset("export.json", &testing_phase_dataset());

    env.sx()
        .args(["-d", data.to_str().unwrap(), "phase", "p-1", "--locale", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown locale"));
}

#[test]
fn test_malformed_dates_degrade_gracefully() {
    let env = TestEnv::new();
    let data = env.write_dataset(
        "export.json",
        &serde_json::json!({
            "projects": [{"id": "p-1", "name": "Messy", "created_at": "not-a-date"}],
            "tasks": [
                {"id": "t-1", "title": "T", "project_id": "p-1", "status": "pending",
                 "created_at": "99/99/9999", "updated_at": null, "due_date": "garbage"}
            ]
        }),
    );

    // Bad dates fall back to "now"; the analysis still succeeds.
    env.sx()
        .args(["-d", data.to_str().unwrap(), "analyze", "p-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"phase\":\"planning\""));
}

#[test]
fn test_build_info() {
    let env = TestEnv::new();

    env.sx()
        .args(["build-info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}
