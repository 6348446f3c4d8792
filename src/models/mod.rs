//! Read models for the lifecycle analysis engine.
//!
//! This module defines the records Sextant consumes, mirroring the JSON
//! served by the project-management backend:
//! - `Project` - a project with its leader and member roster
//! - `Task` - a work item with status, priority, assignees, and due date
//! - `User` - identity as reported in activity records
//!
//! The backend is bilingual, so status and priority values are accepted in
//! both English and Spanish spellings. Timestamps are parsed leniently: a
//! missing or malformed date deserializes to `None`, and the engine
//! substitutes its own `now` snapshot through the accessor methods below.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Task status in the source system's workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "in-progress", alias = "en_progreso", alias = "en progreso")]
    InProgress,
    #[serde(alias = "completed", alias = "completada")]
    Done,
}

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[serde(alias = "baja")]
    Low,
    #[default]
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "alta")]
    High,
}

/// A user as reported in activity records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,
}

/// A work item belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Task title
    pub title: String,

    /// Detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority level
    #[serde(default)]
    pub priority: TaskPriority,

    /// Users assigned to this task
    #[serde(default)]
    pub assignees: Vec<User>,

    /// Owning project
    pub project_id: String,

    /// Target completion date
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Creation timestamp (None when the record carried no usable date)
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp (None when the record carried no usable date)
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task with the given ID, project, and title.
    pub fn new(id: String, project_id: String, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignees: Vec::new(),
            project_id,
            due_date: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Creation time, falling back to `now` for records without a usable date.
    pub fn created(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.created_at.unwrap_or(now)
    }

    /// Last update time, falling back to `now` for records without a usable date.
    pub fn updated(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.updated_at.unwrap_or(now)
    }

    /// True when the task has a due date in the past and is not done.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && self.status != TaskStatus::Done,
            None => false,
        }
    }

    /// Case-insensitive substring scan of title and description.
    ///
    /// `keywords` must already be lowercase.
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        let title = self.title.to_lowercase();
        if keywords.iter().any(|k| title.contains(k)) {
            return true;
        }
        match &self.description {
            Some(desc) => {
                let desc = desc.to_lowercase();
                keywords.iter().any(|k| desc.contains(k))
            }
            None => false,
        }
    }
}

/// A project tracked by the backend.
///
/// The analysis engine reads only `id` and `created_at`; the leader and
/// member roster are carried for fidelity to the source records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: String,

    /// Project name
    #[serde(default)]
    pub name: String,

    /// Creation timestamp (None when the record carried no usable date)
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,

    /// Project leader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<User>,

    /// Project members
    #[serde(default)]
    pub members: Vec<User>,
}

impl Project {
    /// Creation time, falling back to `now` for records without a usable date.
    pub fn created(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.created_at.unwrap_or(now)
    }
}

/// Deserialize an optional timestamp, degrading to `None` on malformed input.
///
/// Accepts RFC 3339 strings and bare `YYYY-MM-DD` dates. Anything else is
/// treated as absent rather than failing the whole record.
fn lenient_datetime<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_datetime))
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_task_serialization_roundtrip() {
        let task = Task::new("t-1".to_string(), "p-1".to_string(), "Test task".to_string());
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.id, deserialized.id);
        assert_eq!(task.title, deserialized.title);
        assert_eq!(task.project_id, deserialized.project_id);
    }

    #[test]
    fn test_status_serialization() {
        let status = TaskStatus::InProgress;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#""in_progress""#);
    }

    #[test]
    fn test_status_spanish_aliases() {
        assert_eq!(
            serde_json::from_str::<TaskStatus>(r#""pendiente""#).unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>(r#""en_progreso""#).unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>(r#""completada""#).unwrap(),
            TaskStatus::Done
        );
    }

    #[test]
    fn test_priority_spanish_aliases() {
        assert_eq!(
            serde_json::from_str::<TaskPriority>(r#""alta""#).unwrap(),
            TaskPriority::High
        );
        assert_eq!(
            serde_json::from_str::<TaskPriority>(r#""baja""#).unwrap(),
            TaskPriority::Low
        );
    }

    #[test]
    fn test_task_default_fields() {
        let json = r#"{"id":"t-1","title":"T","project_id":"p-1"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.assignees.is_empty());
        assert!(task.created_at.is_none());
    }

    #[test]
    fn test_malformed_dates_degrade_to_none() {
        let json = r#"{"id":"t-1","title":"T","project_id":"p-1","created_at":"not a date","due_date":"also bad"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.created_at.is_none());
        assert!(task.due_date.is_none());

        let now = Utc::now();
        assert_eq!(task.created(now), now);
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_bare_date_accepted() {
        let json = r#"{"id":"t-1","title":"T","project_id":"p-1","due_date":"2026-03-01"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.due_date.is_some());
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut task = Task::new("t-1".to_string(), "p-1".to_string(), "T".to_string());
        task.due_date = Some(now - Duration::days(1));
        assert!(task.is_overdue(now));

        task.status = TaskStatus::Done;
        assert!(!task.is_overdue(now));

        task.status = TaskStatus::Pending;
        task.due_date = Some(now + Duration::days(1));
        assert!(!task.is_overdue(now));

        task.due_date = None;
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_mentions_any_case_insensitive() {
        let mut task = Task::new("t-1".to_string(), "p-1".to_string(), "Run PRUEBAS de carga".to_string());
        assert!(task.mentions_any(&["prueba", "test"]));

        task.title = "Quiet title".to_string();
        assert!(!task.mentions_any(&["prueba", "test"]));

        task.description = Some("Deploy to production".to_string());
        assert!(task.mentions_any(&["deploy", "despliegue"]));
    }

    #[test]
    fn test_project_deserialization() {
        let json = r#"{"id":"p-1","name":"Thesis","created_at":"2026-01-10T08:00:00Z","leader":{"id":"u-1","name":"Ana"},"members":[{"id":"u-2","name":"Luis"}]}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "Thesis");
        assert_eq!(project.leader.as_ref().unwrap().name, "Ana");
        assert_eq!(project.members.len(), 1);
        assert!(project.created_at.is_some());
    }
}
