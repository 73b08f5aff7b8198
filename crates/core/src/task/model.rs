//! Task model definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::Entity;
use crate::id::{TaskId, UserId};

/// Task progress
///
/// Any status may follow any other; there is no enforced ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        };
        f.write_str(label)
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

/// A unit of work, optionally assigned to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    /// Back-reference to the responsible user, not ownership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
}

impl Task {
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_to == Some(user_id)
    }
}

impl Entity for Task {
    type Id = TaskId;
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> TaskId {
        self.id
    }
}

/// Fields for a task about to be created
///
/// New tasks always start pending and unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            priority: TaskPriority::default(),
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            due_date: self.due_date,
            priority: self.priority,
            status: TaskStatus::default(),
            assigned_to: None,
        }
    }
}

impl From<&str> for NewTask {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for NewTask {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// Partial update of a task; `None` fields are left as they are
///
/// Assignment is not part of the patch, see `TaskStore::assign`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the due date
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Overwrite the patched fields of `task`
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_task() {
        let task = NewTask::new("Test task").into_task(TaskId::new(1));
        assert_eq!(task.title, "Test task");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.assigned_to.is_none());
    }

    #[test]
    fn test_task_with_priority_and_due_date() {
        let task = NewTask::new("Test task")
            .with_priority(TaskPriority::High)
            .with_due_date(date(2026, 11, 1))
            .into_task(TaskId::new(1));

        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.due_date, Some(date(2026, 11, 1)));
    }

    #[test]
    fn test_status_transitions_are_permissive() {
        let mut task = NewTask::new("Test task").into_task(TaskId::new(1));

        TaskPatch::new().status(TaskStatus::Completed).apply(&mut task);
        assert_eq!(task.status, TaskStatus::Completed);

        TaskPatch::new().status(TaskStatus::Pending).apply(&mut task);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_patch_clears_due_date() {
        let mut task = NewTask::new("Test task")
            .with_due_date(date(2026, 11, 1))
            .into_task(TaskId::new(1));

        TaskPatch::new().title("Renamed").apply(&mut task);
        assert_eq!(task.due_date, Some(date(2026, 11, 1)));

        TaskPatch::new().clear_due_date().apply(&mut task);
        assert_eq!(task.title, "Renamed");
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_serialized_format() {
        let mut task = NewTask::new("Write spec")
            .with_priority(TaskPriority::Low)
            .with_due_date(date(2026, 10, 31))
            .into_task(TaskId::new(5));
        task.status = TaskStatus::InProgress;
        task.assigned_to = Some(UserId::new(2));

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "title": "Write spec",
                "due_date": "2026-10-31",
                "priority": "low",
                "status": "in_progress",
                "assigned_to": 2
            })
        );
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
        assert_eq!(TaskPriority::High.to_string(), "High");
    }
}
