//! Quantitative project metrics derived from the task set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Task, TaskPriority, TaskStatus};

/// Days covered by the recent-activity window.
const RECENT_ACTIVITY_DAYS: i64 = 7;

/// Quantitative snapshot of a project's task set.
///
/// All ratios are guarded against empty task lists: an empty project yields
/// zero counts and zero rates rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Whole days elapsed since the project was created
    pub days_since_start: i64,

    /// Total number of tasks
    pub total_tasks: usize,

    /// Tasks with status done
    pub completed_tasks: usize,

    /// Tasks with status in-progress
    pub in_progress_tasks: usize,

    /// Tasks with status pending
    pub pending_tasks: usize,

    /// Completed share of all tasks as a percentage (0 when there are none)
    pub completion_rate: f64,

    /// Tasks with high priority
    pub high_priority_tasks: usize,

    /// High-priority tasks already done
    pub high_priority_completed: usize,

    /// Tasks past their due date and not done
    pub overdue_tasks: usize,

    /// Mean task age in days across all tasks (0 when there are none)
    pub average_task_age: f64,

    /// Tasks updated within the last seven days
    pub recent_activity: usize,
}

/// Derive metrics for a project created at `project_created` from its tasks.
pub fn calculate(
    project_created: DateTime<Utc>,
    tasks: &[Task],
    now: DateTime<Utc>,
) -> ProjectMetrics {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
    let in_progress_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::InProgress)
        .count();
    let pending_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .count();

    let completion_rate = if total_tasks > 0 {
        completed_tasks as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };

    let high_priority_tasks = tasks
        .iter()
        .filter(|t| t.priority == TaskPriority::High)
        .count();
    let high_priority_completed = tasks
        .iter()
        .filter(|t| t.priority == TaskPriority::High && t.status == TaskStatus::Done)
        .count();

    let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(now)).count();

    let average_task_age = if total_tasks > 0 {
        let total_days: i64 = tasks.iter().map(|t| (now - t.created(now)).num_days()).sum();
        total_days as f64 / total_tasks as f64
    } else {
        0.0
    };

    let recent_window = Duration::days(RECENT_ACTIVITY_DAYS);
    let recent_activity = tasks
        .iter()
        .filter(|t| now - t.updated(now) <= recent_window)
        .count();

    ProjectMetrics {
        days_since_start: (now - project_created).num_days(),
        total_tasks,
        completed_tasks,
        in_progress_tasks,
        pending_tasks,
        completion_rate,
        high_priority_tasks,
        high_priority_completed,
        overdue_tasks,
        average_task_age,
        recent_activity,
    }
}
