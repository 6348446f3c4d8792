//! Health classification, phase-local progress, and trend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clamp_pct;
use super::explain::Locale;
use super::metrics::ProjectMetrics;
use super::phase::Phase;
use crate::models::{Task, TaskPriority};

/// Ternary schedule-risk state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Health {
    OnTime,
    AtRisk,
    Delayed,
}

impl Health {
    /// Display label in the requested locale.
    pub fn display_name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Health::OnTime => "on time",
                Health::AtRisk => "at risk",
                Health::Delayed => "delayed",
            },
            Locale::Es => match self {
                Health::OnTime => "en tiempo",
                Health::AtRisk => "en riesgo",
                Health::Delayed => "retrasado",
            },
        }
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Health::OnTime => "on_time",
            Health::AtRisk => "at_risk",
            Health::Delayed => "delayed",
        };
        write!(f, "{}", s)
    }
}

/// Momentum signal derived from recent activity and backlog shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Stable,
    Down,
    AtRisk,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Trend::Up => "up",
            Trend::Stable => "stable",
            Trend::Down => "down",
            Trend::AtRisk => "at_risk",
        };
        write!(f, "{}", s)
    }
}

/// Classify schedule health.
///
/// Checks run in priority order: an overdue high-priority task means delayed
/// no matter what else the metrics say.
pub fn classify(metrics: &ProjectMetrics, tasks: &[Task], now: DateTime<Utc>) -> Health {
    let high_priority_overdue = tasks
        .iter()
        .any(|t| t.priority == TaskPriority::High && t.is_overdue(now));
    if high_priority_overdue {
        return Health::Delayed;
    }
    if metrics.overdue_tasks > 0
        || (metrics.completion_rate < 30.0 && metrics.days_since_start > 14)
    {
        return Health::AtRisk;
    }
    Health::OnTime
}

/// Progress within the given phase, recomputed from the metrics.
pub fn phase_progress(phase: Phase, metrics: &ProjectMetrics) -> u8 {
    let rate = metrics.completion_rate;
    let value = match phase {
        Phase::Planning => (metrics.total_tasks as f64 / 5.0 * 10.0).min(50.0),
        Phase::AnalysisDesign => rate * 2.0,
        Phase::Development => (rate / 80.0 * 100.0).min(100.0),
        Phase::Testing => (rate - 80.0) / 20.0 * 100.0,
        Phase::Deployment => {
            if rate >= 90.0 {
                100.0
            } else {
                75.0
            }
        }
        Phase::Maintenance | Phase::Finalized => 100.0,
    };
    clamp_pct(value)
}

/// Derive the trend signal, evaluated in priority order.
pub fn trend(metrics: &ProjectMetrics) -> Trend {
    if metrics.overdue_tasks > 0 {
        return Trend::Down;
    }
    if metrics.total_tasks > 0
        && metrics.recent_activity as f64 >= 0.2 * metrics.total_tasks as f64
    {
        return Trend::Up;
    }
    if metrics.in_progress_tasks == 0 && metrics.pending_tasks > 0 {
        return Trend::AtRisk;
    }
    Trend::Stable
}
