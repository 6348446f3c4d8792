//! Deployment date estimation.

use chrono::{DateTime, Duration, Utc};

use super::phase::Phase;
use crate::models::{Task, TaskStatus};

/// Project a likely deployment date.
///
/// Late-phase projects with dated remaining work use the latest such due
/// date. Otherwise the estimate extrapolates from historical completion
/// velocity: mean task duration times the number of tasks left. With no
/// completed tasks there is nothing to extrapolate from and the estimate
/// is `None`.
pub fn deployment_date(phase: Phase, tasks: &[Task], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if matches!(phase, Phase::Deployment | Phase::Maintenance | Phase::Finalized) {
        let latest_due = tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .filter_map(|t| t.due_date)
            .max();
        if latest_due.is_some() {
            return latest_due;
        }
    }

    let completed: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Done)
        .collect();
    if completed.is_empty() {
        return None;
    }

    let total_seconds: i64 = completed
        .iter()
        .map(|t| (t.updated(now) - t.created(now)).num_seconds().max(0))
        .sum();
    let average_seconds = total_seconds / completed.len() as i64;
    let remaining = tasks.iter().filter(|t| t.status != TaskStatus::Done).count() as i64;

    Some(now + Duration::seconds(average_seconds * remaining))
}
