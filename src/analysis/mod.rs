//! Project lifecycle analysis.
//!
//! The engine is a pure function of a project and its task set. Stages run
//! in strict sequence, each consuming earlier outputs:
//! 1. [`metrics`] - quantitative task metrics
//! 2. [`phase`] - lifecycle phase inference (ordered rule cascade)
//! 3. [`health`] - on-time / at-risk / delayed classification, progress, trend
//! 4. [`activity`] - who is actively working, with recency buckets
//! 5. [`estimate`] - projected deployment date
//! 6. [`explain`] - natural-language narrative
//!
//! Wall-clock time is sampled once per invocation and threaded through every
//! stage, so overdue checks and recency buckets always agree on a single
//! `now`. Running [`analyze_at`] twice with the same inputs and the same
//! `now` yields identical output.

pub mod activity;
pub mod estimate;
pub mod explain;
pub mod health;
pub mod metrics;
pub mod phase;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Project, Task};

pub use activity::{Recency, UserActivity};
pub use explain::Locale;
pub use health::{Health, Trend};
pub use metrics::ProjectMetrics;
pub use phase::{Phase, PhaseDecision, PhaseStatus};

/// Snapshot of the inferred phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDetail {
    /// The inferred phase
    pub id: Phase,

    /// Progress state of that phase
    pub status: PhaseStatus,

    /// Phase-local progress as reported by the matching rule (0-100)
    pub progress: u8,
}

/// Complete analysis of a project's lifecycle state.
///
/// A pure value record: recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleAnalysis {
    /// The analyzed project
    pub project_id: String,

    /// Current lifecycle phase
    pub phase: Phase,

    /// Phase id, status, and rule-reported progress
    pub phase_detail: PhaseDetail,

    /// Quantitative task metrics
    pub metrics: ProjectMetrics,

    /// Health classification
    pub health: Health,

    /// Overall progress (rounded completion rate, 0-100)
    pub overall_progress: u8,

    /// Progress within the current phase (0-100)
    pub phase_progress: u8,

    /// Momentum signal
    pub trend: Trend,

    /// Projected deployment date, when enough data exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_deployment: Option<DateTime<Utc>>,

    /// Natural-language narrative of the analysis
    pub explanation: String,

    /// Reasons supporting the phase verdict
    pub reasons: Vec<String>,

    /// Confidence in the phase verdict (0-100)
    pub confidence: u8,

    /// Users currently working on in-progress tasks, most recent first
    pub active_users: Vec<UserActivity>,
}

/// Analyze a project against the full task collection.
///
/// Samples `now` once and renders the explanation in English. Tasks are
/// filtered internally to those belonging to `project`.
pub fn analyze(project: &Project, tasks: &[Task]) -> LifecycleAnalysis {
    analyze_at(project, tasks, Utc::now(), Locale::default())
}

/// Analyze with an injected `now` and locale.
///
/// This is the deterministic core: every stage sees the same timestamp, so
/// tests can freeze time and compare outputs byte for byte.
pub fn analyze_at(
    project: &Project,
    tasks: &[Task],
    now: DateTime<Utc>,
    locale: Locale,
) -> LifecycleAnalysis {
    let scoped: Vec<Task> = tasks
        .iter()
        .filter(|t| t.project_id == project.id)
        .cloned()
        .collect();

    let metrics = metrics::calculate(project.created(now), &scoped, now);
    let decision = phase::classify(&metrics, &scoped, now);
    let health = health::classify(&metrics, &scoped, now);
    let overall_progress = clamp_pct(metrics.completion_rate);
    let phase_progress = health::phase_progress(decision.phase, &metrics);
    let trend = health::trend(&metrics);
    let active_users = activity::detect(&scoped, now);
    let estimated_deployment = estimate::deployment_date(decision.phase, &scoped, now);
    let explanation = explain::render(
        locale,
        decision.phase,
        decision.confidence,
        &decision.reasons,
        overall_progress,
        phase_progress,
        health,
        metrics.in_progress_tasks,
    );

    LifecycleAnalysis {
        project_id: project.id.clone(),
        phase: decision.phase,
        phase_detail: PhaseDetail {
            id: decision.phase,
            status: decision.status,
            progress: decision.progress,
        },
        metrics,
        health,
        overall_progress,
        phase_progress,
        trend,
        estimated_deployment,
        explanation,
        reasons: decision.reasons,
        confidence: decision.confidence,
        active_users,
    }
}

/// Round and clamp a percentage value to 0-100.
pub(crate) fn clamp_pct(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
