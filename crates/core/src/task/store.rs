//! Task store

use std::sync::Arc;

use super::model::{NewTask, Task, TaskPatch, TaskStatus};
use crate::collection::Collection;
use crate::id::{TaskId, UserId};
use crate::storage::PersistenceAdapter;
use crate::Result;

/// Insertion-ordered task collection persisted under `"tasks"`
///
/// Assignment here is unchecked: `assign` accepts any user id. The
/// [`Board`](crate::Board) checks the user exists and clears assignments
/// when a user is deleted.
pub struct TaskStore {
    tasks: Collection<Task>,
}

impl TaskStore {
    /// Open the store, loading any previously saved tasks
    pub async fn open(storage: Arc<dyn PersistenceAdapter>) -> Result<Self> {
        Ok(Self {
            tasks: Collection::open(storage).await?,
        })
    }

    /// Create a pending, unassigned task with a fresh id
    pub async fn create(&self, task: impl Into<NewTask>) -> Result<Task> {
        let task = task.into();
        self.tasks.insert_with(|id| task.into_task(id)).await
    }

    /// Snapshot of all tasks in creation order
    pub async fn list(&self) -> Vec<Task> {
        self.tasks.list().await
    }

    pub async fn get(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(id).await
    }

    /// Apply `patch` to a task. Returns `false` if there is no such task.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<bool> {
        let updated = self.tasks.modify(id, |task| patch.apply(task)).await?;
        Ok(updated.is_some())
    }

    /// Remove a task. Returns `false` if there is no such task.
    pub async fn delete(&self, id: TaskId) -> Result<bool> {
        Ok(self.tasks.remove(id).await?.is_some())
    }

    /// Point a task at a user. Returns `false` if there is no such task.
    pub async fn assign(&self, task_id: TaskId, user_id: UserId) -> Result<bool> {
        let updated = self
            .tasks
            .modify(task_id, |task| task.assigned_to = Some(user_id))
            .await?;
        Ok(updated.is_some())
    }

    /// Clear a task's assignment. Returns `false` if there is no such task.
    pub async fn unassign(&self, task_id: TaskId) -> Result<bool> {
        let updated = self
            .tasks
            .modify(task_id, |task| task.assigned_to = None)
            .await?;
        Ok(updated.is_some())
    }

    /// Tasks assigned to `user_id`, in creation order
    pub async fn tasks_by_assignee(&self, user_id: UserId) -> Vec<Task> {
        self.tasks.filter(|task| task.is_assigned_to(user_id)).await
    }

    /// Tasks with the given status, in creation order
    pub async fn tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks.filter(|task| task.status == status).await
    }

    /// Clear the assignment of every task assigned to `user_id`.
    ///
    /// Returns the ids of the tasks that were assigned to that user.
    pub async fn clear_assignee(&self, user_id: UserId) -> Result<Vec<TaskId>> {
        self.tasks
            .modify_where(
                |task| task.is_assigned_to(user_id),
                |task| task.assigned_to = None,
            )
            .await
    }
}
