//! Lifecycle phase inference.
//!
//! The classifier is an ordered cascade of rules. Each rule inspects the
//! metrics and the raw task set and either declines or produces a full
//! verdict: phase, confidence, phase status, phase-local progress, and the
//! reasons backing the call. The first rule to match wins.
//!
//! Rules for the late phases (finalized, deployment, maintenance) run before
//! the broad testing rule, which would otherwise shadow them: any project
//! with a completion rate of 80% or more satisfies the testing predicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clamp_pct;
use super::explain::Locale;
use super::metrics::ProjectMetrics;
use crate::models::{Task, TaskStatus};

/// The seven lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    AnalysisDesign,
    Development,
    Testing,
    Deployment,
    Maintenance,
    Finalized,
}

impl Phase {
    /// Display name in the requested locale.
    pub fn display_name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Phase::Planning => "Planning",
                Phase::AnalysisDesign => "Analysis & Design",
                Phase::Development => "Development",
                Phase::Testing => "Testing",
                Phase::Deployment => "Deployment",
                Phase::Maintenance => "Maintenance",
                Phase::Finalized => "Finalized",
            },
            Locale::Es => match self {
                Phase::Planning => "Planificación",
                Phase::AnalysisDesign => "Análisis y Diseño",
                Phase::Development => "Desarrollo",
                Phase::Testing => "Pruebas",
                Phase::Deployment => "Despliegue",
                Phase::Maintenance => "Mantenimiento",
                Phase::Finalized => "Finalizado",
            },
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Planning => "planning",
            Phase::AnalysisDesign => "analysis_design",
            Phase::Development => "development",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
            Phase::Maintenance => "maintenance",
            Phase::Finalized => "finalized",
        };
        write!(f, "{}", s)
    }
}

/// Progress state of the inferred phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// Keywords hinting that testing work is underway.
pub(crate) const TESTING_KEYWORDS: &[&str] = &["test", "prueba"];

/// Keywords hinting that deployment work is underway.
pub(crate) const DEPLOYMENT_KEYWORDS: &[&str] = &["deploy", "despliegue"];

/// Keywords hinting at design or analysis work.
pub(crate) const DESIGN_KEYWORDS: &[&str] = &["diseño", "análisis"];

/// A classifier verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDecision {
    pub phase: Phase,
    pub confidence: u8,
    pub status: PhaseStatus,
    pub progress: u8,
    pub reasons: Vec<String>,
}

/// Everything a rule may look at.
struct RuleContext<'a> {
    metrics: &'a ProjectMetrics,
    tasks: &'a [Task],
    now: DateTime<Utc>,
}

impl RuleContext<'_> {
    fn mentions_any(&self, keywords: &[&str]) -> bool {
        self.tasks.iter().any(|t| t.mentions_any(keywords))
    }
}

type Rule = fn(&RuleContext) -> Option<PhaseDecision>;

/// Rules in evaluation order; the first match wins.
const RULES: &[Rule] = &[
    planning_rule,
    analysis_design_rule,
    finalized_rule,
    deployment_rule,
    maintenance_rule,
    testing_rule,
    development_rule,
];

/// Run the cascade and return the winning verdict.
///
/// Always produces a decision: when no rule matches, the fallback infers
/// development if any task shows activity and planning otherwise.
pub fn classify(metrics: &ProjectMetrics, tasks: &[Task], now: DateTime<Utc>) -> PhaseDecision {
    let ctx = RuleContext { metrics, tasks, now };
    for rule in RULES {
        if let Some(decision) = rule(&ctx) {
            return decision;
        }
    }
    fallback(metrics)
}

/// Young project with nothing started yet.
fn planning_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    if m.days_since_start >= 3 || m.in_progress_tasks > 0 || m.completed_tasks > 0 {
        return None;
    }
    Some(PhaseDecision {
        phase: Phase::Planning,
        confidence: 90,
        status: if m.total_tasks == 0 {
            PhaseStatus::Pending
        } else {
            PhaseStatus::InProgress
        },
        progress: clamp_pct((m.total_tasks as f64 / 5.0 * 10.0).min(50.0)),
        reasons: vec![
            format!("Project is {} days old", m.days_since_start),
            "No tasks have been started or completed yet".to_string(),
        ],
    })
}

/// Low completion with a backlog dominating the work in flight.
fn analysis_design_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    if m.completion_rate >= 20.0 || m.pending_tasks <= 2 * m.in_progress_tasks {
        return None;
    }
    Some(PhaseDecision {
        phase: Phase::AnalysisDesign,
        confidence: 75,
        status: PhaseStatus::InProgress,
        progress: clamp_pct(m.completion_rate * 2.0),
        reasons: vec![
            format!("{}% of tasks completed", m.completion_rate.round() as i64),
            format!(
                "{} pending vs {} in progress",
                m.pending_tasks, m.in_progress_tasks
            ),
        ],
    })
}

/// Every task done, nothing pending.
fn finalized_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    if m.total_tasks == 0 || m.completed_tasks != m.total_tasks || m.pending_tasks > 0 {
        return None;
    }
    Some(PhaseDecision {
        phase: Phase::Finalized,
        confidence: 95,
        status: PhaseStatus::Completed,
        progress: 100,
        reasons: vec![
            "All tasks completed".to_string(),
            "No pending tasks remain".to_string(),
        ],
    })
}

/// High-priority work closed out near the end, or tasks naming deployment.
fn deployment_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    let high_priority_done =
        m.high_priority_tasks > 0 && m.high_priority_completed == m.high_priority_tasks;
    let by_rate = high_priority_done && m.completion_rate >= 90.0;
    let by_keyword = ctx.mentions_any(DEPLOYMENT_KEYWORDS);
    if !by_rate && !by_keyword {
        return None;
    }

    let mut reasons = Vec::new();
    if by_rate {
        reasons.push(format!(
            "All {} high-priority tasks are done",
            m.high_priority_tasks
        ));
        reasons.push(format!(
            "{}% of tasks completed",
            m.completion_rate.round() as i64
        ));
    }
    if by_keyword {
        reasons.push("Tasks mention deployment work".to_string());
    }

    Some(PhaseDecision {
        phase: Phase::Deployment,
        confidence: 85,
        status: PhaseStatus::InProgress,
        progress: if m.completion_rate >= 95.0 { 100 } else { 75 },
        reasons,
    })
}

/// Nearly everything done, but new tasks arrived after the last completion.
fn maintenance_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    if m.completion_rate < 95.0 {
        return None;
    }
    // Never fires when no task has completed: there is no completion to
    // compare creation times against.
    let last_completion = ctx
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .map(|t| t.updated(ctx.now))
        .max()?;
    let has_newer = ctx
        .tasks
        .iter()
        .any(|t| t.created(ctx.now) > last_completion);
    if !has_newer {
        return None;
    }
    Some(PhaseDecision {
        phase: Phase::Maintenance,
        confidence: 75,
        status: PhaseStatus::InProgress,
        progress: 100,
        reasons: vec![
            format!("{}% of tasks completed", m.completion_rate.round() as i64),
            "New tasks were created after the last completion".to_string(),
        ],
    })
}

/// High completion rate, or testing vocabulary with moderate completion.
fn testing_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    let by_keyword = ctx.mentions_any(TESTING_KEYWORDS) && m.completion_rate >= 60.0;
    if m.completion_rate < 80.0 && !by_keyword {
        return None;
    }

    let mut reasons = vec![format!(
        "{}% of tasks completed",
        m.completion_rate.round() as i64
    )];
    if by_keyword {
        reasons.push("Tasks mention testing work".to_string());
    }

    Some(PhaseDecision {
        phase: Phase::Testing,
        confidence: 80,
        status: PhaseStatus::InProgress,
        progress: clamp_pct((m.completion_rate - 80.0) / 20.0 * 100.0),
        reasons,
    })
}

/// A meaningful share of tasks underway, without testing vocabulary.
fn development_rule(ctx: &RuleContext) -> Option<PhaseDecision> {
    let m = ctx.metrics;
    if m.total_tasks == 0 {
        return None;
    }
    let activity_rate =
        (m.in_progress_tasks + m.completed_tasks) as f64 / m.total_tasks as f64 * 100.0;
    if activity_rate < 30.0 || m.completion_rate >= 80.0 || ctx.mentions_any(TESTING_KEYWORDS) {
        return None;
    }
    Some(PhaseDecision {
        phase: Phase::Development,
        confidence: 85,
        status: PhaseStatus::InProgress,
        progress: clamp_pct((m.completion_rate / 80.0 * 100.0).min(100.0)),
        reasons: vec![
            format!(
                "{}% of tasks are underway or done",
                activity_rate.round() as i64
            ),
            format!("{}% of tasks completed", m.completion_rate.round() as i64),
        ],
    })
}

/// No rule matched: any activity at all means development, else planning.
fn fallback(m: &ProjectMetrics) -> PhaseDecision {
    if m.in_progress_tasks > 0 || m.completed_tasks > 0 {
        PhaseDecision {
            phase: Phase::Development,
            confidence: 60,
            status: PhaseStatus::InProgress,
            progress: clamp_pct(m.completion_rate),
            reasons: vec![format!(
                "{} of {} tasks show activity",
                m.in_progress_tasks + m.completed_tasks,
                m.total_tasks
            )],
        }
    } else {
        PhaseDecision {
            phase: Phase::Planning,
            confidence: 70,
            status: PhaseStatus::Pending,
            progress: 10,
            reasons: vec!["No task activity recorded yet".to_string()],
        }
    }
}
