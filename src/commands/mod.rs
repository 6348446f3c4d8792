//! Command implementations for the Sextant CLI.
//!
//! Each command loads the dataset, runs the analysis engine, and returns a
//! result record. Records implement [`Output`] so `main` can render them as
//! JSON (the default) or human-readable text (`-H`).

use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use crate::analysis::{self, Health, LifecycleAnalysis, Locale, ProjectMetrics, Trend, UserActivity};
use crate::config::SextantConfig;
use crate::storage;
use crate::Result;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output: Serialize {
    /// Serialize to a JSON string.
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Result of `sx analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeReport {
    pub project_name: String,

    #[serde(flatten)]
    pub analysis: LifecycleAnalysis,
}

impl Output for AnalyzeReport {
    fn to_human(&self) -> String {
        let a = &self.analysis;
        let mut out = String::new();
        out.push_str(&format!("Project:  {} ({})\n", a.project_id, self.project_name));
        out.push_str(&format!(
            "Phase:    {} ({}% confidence, {})\n",
            a.phase, a.confidence, a.phase_detail.status
        ));
        out.push_str(&format!("Health:   {}\n", a.health));
        out.push_str(&format!("Trend:    {}\n", a.trend));
        out.push_str(&format!(
            "Progress: {}% overall, {}% within phase\n",
            a.overall_progress, a.phase_progress
        ));
        match a.estimated_deployment {
            Some(when) => out.push_str(&format!(
                "Deployment estimate: {}\n",
                when.format("%Y-%m-%d %H:%M UTC")
            )),
            None => out.push_str("Deployment estimate: insufficient data\n"),
        }
        out.push_str("Reasons:\n");
        for reason in &a.reasons {
            out.push_str(&format!("  - {}\n", reason));
        }
        if !a.active_users.is_empty() {
            out.push_str("Active users:\n");
            for activity in &a.active_users {
                out.push_str(&format!(
                    "  - {} on \"{}\" ({})\n",
                    activity.user.name, activity.task_title, activity.recency
                ));
            }
        }
        out.push('\n');
        out.push_str(&a.explanation);
        out
    }
}

/// Result of `sx phase`.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport {
    pub project_id: String,
    pub phase: analysis::Phase,
    pub phase_name: String,
    pub confidence: u8,
    pub status: analysis::PhaseStatus,
    pub progress: u8,
    pub reasons: Vec<String>,
}

impl Output for PhaseReport {
    fn to_human(&self) -> String {
        let mut out = format!(
            "{}: {} ({}% confidence, {}% progress)\n",
            self.project_id, self.phase_name, self.confidence, self.progress
        );
        for reason in &self.reasons {
            out.push_str(&format!("  - {}\n", reason));
        }
        out.trim_end().to_string()
    }
}

/// Result of `sx health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub project_id: String,
    pub health: Health,
    pub trend: Trend,
    pub overdue_tasks: usize,
    pub days_since_start: i64,
}

impl Output for HealthReport {
    fn to_human(&self) -> String {
        format!(
            "{}: {} (trend {}, {} overdue task(s), day {} of the project)",
            self.project_id, self.health, self.trend, self.overdue_tasks, self.days_since_start
        )
    }
}

/// Result of `sx metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub project_id: String,
    pub metrics: ProjectMetrics,
}

impl Output for MetricsReport {
    fn to_human(&self) -> String {
        let m = &self.metrics;
        format!(
            "Project {} (day {})\n\
             Tasks:      {} total / {} done / {} in progress / {} pending\n\
             Completion: {:.1}%\n\
             High priority: {} of {} done\n\
             Overdue:    {}\n\
             Avg age:    {:.1} days\n\
             Updated in last 7 days: {}",
            self.project_id,
            m.days_since_start,
            m.total_tasks,
            m.completed_tasks,
            m.in_progress_tasks,
            m.pending_tasks,
            m.completion_rate,
            m.high_priority_completed,
            m.high_priority_tasks,
            m.overdue_tasks,
            m.average_task_age,
            m.recent_activity,
        )
    }
}

/// Result of `sx activity`.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub project_id: String,
    pub count: usize,
    pub active_users: Vec<UserActivity>,
}

impl Output for ActivityReport {
    fn to_human(&self) -> String {
        if self.active_users.is_empty() {
            return format!("{}: nobody is working on in-progress tasks", self.project_id);
        }
        let mut out = format!("{}: {} active user(s)\n", self.project_id, self.count);
        for a in &self.active_users {
            out.push_str(&format!(
                "  - {} on \"{}\" [{}] ({}, last activity {})\n",
                a.user.name,
                a.task_title,
                a.phase,
                a.recency,
                a.last_activity.format("%Y-%m-%d %H:%M UTC")
            ));
        }
        out.trim_end().to_string()
    }
}

/// One row of `sx projects`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: f64,
}

/// Result of `sx projects`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectsReport {
    pub projects: Vec<ProjectSummary>,
}

impl Output for ProjectsReport {
    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects in dataset.".to_string();
        }
        let mut out = String::new();
        for p in &self.projects {
            out.push_str(&format!(
                "{}  {} ({}/{} tasks done, {:.0}%)\n",
                p.id, p.name, p.completed_tasks, p.total_tasks, p.completion_rate
            ));
        }
        out.trim_end().to_string()
    }
}

/// Result of `sx config get` / `sx config set`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValueReport {
    pub key: String,
    pub value: Option<String>,
}

impl Output for ConfigValueReport {
    fn to_human(&self) -> String {
        match &self.value {
            Some(value) => format!("{} = {}", self.key, value),
            None => format!("{} is not set", self.key),
        }
    }
}

/// Result of `sx config list`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigListReport {
    pub entries: Vec<ConfigValueReport>,
}

impl Output for ConfigListReport {
    fn to_human(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.to_human())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run the full analysis for one project.
pub fn analyze(data_path: &Path, project_id: &str, locale: Locale) -> Result<AnalyzeReport> {
    let dataset = storage::load_dataset(data_path)?;
    let project = dataset.project(project_id)?;
    debug!(project = project_id, "running lifecycle analysis");
    let analysis = analysis::analyze_at(project, &dataset.tasks, Utc::now(), locale);
    Ok(AnalyzeReport {
        project_name: project.name.clone(),
        analysis,
    })
}

/// Report only the phase verdict.
pub fn phase(data_path: &Path, project_id: &str, locale: Locale) -> Result<PhaseReport> {
    let report = analyze(data_path, project_id, locale)?;
    let a = report.analysis;
    Ok(PhaseReport {
        project_id: a.project_id,
        phase: a.phase,
        phase_name: a.phase.display_name(locale).to_string(),
        confidence: a.confidence,
        status: a.phase_detail.status,
        progress: a.phase_detail.progress,
        reasons: a.reasons,
    })
}

/// Report only the health classification.
pub fn health(data_path: &Path, project_id: &str, locale: Locale) -> Result<HealthReport> {
    let report = analyze(data_path, project_id, locale)?;
    let a = report.analysis;
    Ok(HealthReport {
        project_id: a.project_id,
        health: a.health,
        trend: a.trend,
        overdue_tasks: a.metrics.overdue_tasks,
        days_since_start: a.metrics.days_since_start,
    })
}

/// Report only the metrics record.
pub fn metrics(data_path: &Path, project_id: &str, locale: Locale) -> Result<MetricsReport> {
    let report = analyze(data_path, project_id, locale)?;
    let a = report.analysis;
    Ok(MetricsReport {
        project_id: a.project_id,
        metrics: a.metrics,
    })
}

/// Report only the active users.
pub fn activity(data_path: &Path, project_id: &str, locale: Locale) -> Result<ActivityReport> {
    let report = analyze(data_path, project_id, locale)?;
    let a = report.analysis;
    Ok(ActivityReport {
        project_id: a.project_id,
        count: a.active_users.len(),
        active_users: a.active_users,
    })
}

/// Summarize every project in the dataset.
pub fn projects(data_path: &Path) -> Result<ProjectsReport> {
    let dataset = storage::load_dataset(data_path)?;
    let projects = dataset
        .projects
        .iter()
        .map(|p| {
            let tasks = dataset.tasks_for(&p.id);
            let total = tasks.len();
            let completed = tasks
                .iter()
                .filter(|t| t.status == crate::models::TaskStatus::Done)
                .count();
            let completion_rate = if total > 0 {
                completed as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            ProjectSummary {
                id: p.id.clone(),
                name: p.name.clone(),
                total_tasks: total,
                completed_tasks: completed,
                completion_rate,
            }
        })
        .collect();
    Ok(ProjectsReport { projects })
}

/// Read one config key.
pub fn config_get(key: &str) -> Result<ConfigValueReport> {
    let config = SextantConfig::load()?;
    Ok(ConfigValueReport {
        key: key.to_string(),
        value: config.get(key)?,
    })
}

/// Write one config key and persist.
pub fn config_set(key: &str, value: &str) -> Result<ConfigValueReport> {
    let mut config = SextantConfig::load()?;
    config.set(key, value)?;
    config.save()?;
    Ok(ConfigValueReport {
        key: key.to_string(),
        value: config.get(key)?,
    })
}

/// List all config keys.
pub fn config_list() -> Result<ConfigListReport> {
    let config = SextantConfig::load()?;
    Ok(ConfigListReport {
        entries: config
            .entries()
            .into_iter()
            .map(|(key, value)| ConfigValueReport {
                key: key.to_string(),
                value,
            })
            .collect(),
    })
}
