//! Active-user detection over in-progress tasks.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{DEPLOYMENT_KEYWORDS, DESIGN_KEYWORDS, Phase, TESTING_KEYWORDS};
use crate::models::{Task, TaskStatus, User};

/// How recently a user touched their task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recency {
    /// Updated within the last hour
    Active,
    /// Updated within the last day
    Recent,
    /// No update for more than a day
    Idle,
}

impl std::fmt::Display for Recency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Recency::Active => "active",
            Recency::Recent => "recent",
            Recency::Idle => "idle",
        };
        write!(f, "{}", s)
    }
}

/// A user currently working on an in-progress task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    /// Who is working
    pub user: User,

    /// The task they were last seen on
    pub task_id: String,

    /// Title of that task
    pub task_title: String,

    /// Phase hinted by the task's wording
    pub phase: Phase,

    /// When the task was last touched
    pub last_activity: DateTime<Utc>,

    /// Recency bucket for `last_activity`
    pub recency: Recency,
}

/// Scan in-progress tasks and report who is working on what.
///
/// Each user appears at most once, keyed to their most recently updated
/// task (last write wins on equal timestamps). Output is sorted by last
/// activity, newest first, with the user id as a deterministic tiebreak.
pub fn detect(tasks: &[Task], now: DateTime<Utc>) -> Vec<UserActivity> {
    let mut latest: HashMap<String, UserActivity> = HashMap::new();

    for task in tasks.iter().filter(|t| t.status == TaskStatus::InProgress) {
        let last_activity = task.updated(now);
        let recency = bucket(now - last_activity);
        let phase = task_phase_hint(task);

        for user in &task.assignees {
            let candidate = UserActivity {
                user: user.clone(),
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                phase,
                last_activity,
                recency,
            };
            match latest.entry(user.id.clone()) {
                Entry::Occupied(mut slot) => {
                    if slot.get().last_activity <= candidate.last_activity {
                        slot.insert(candidate);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut activities: Vec<UserActivity> = latest.into_values().collect();
    activities.sort_by(|a, b| {
        b.last_activity
            .cmp(&a.last_activity)
            .then_with(|| a.user.id.cmp(&b.user.id))
    });
    activities
}

fn bucket(elapsed: Duration) -> Recency {
    if elapsed <= Duration::hours(1) {
        Recency::Active
    } else if elapsed <= Duration::hours(24) {
        Recency::Recent
    } else {
        Recency::Idle
    }
}

/// Infer a display phase for a task from its wording.
fn task_phase_hint(task: &Task) -> Phase {
    if task.mentions_any(DEPLOYMENT_KEYWORDS) {
        Phase::Deployment
    } else if task.mentions_any(TESTING_KEYWORDS) {
        Phase::Testing
    } else if task.mentions_any(DESIGN_KEYWORDS) {
        Phase::AnalysisDesign
    } else {
        Phase::Development
    }
}
