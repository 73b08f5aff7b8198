//! Board: users and tasks together
//!
//! The stores are independent collections. The board composes them and owns
//! everything that spans both:
//! - clearing task assignments when a user is deleted
//! - refusing to assign a task to a user that does not exist
//! - rejecting blank names and titles
//! - confirmation-gated deletes
//! - change notifications for whatever renders the board
//!
//! The stores are private to the board: callers read through the board's
//! query methods and mutate only through its operations.

mod confirm;
mod event;

pub use confirm::{Confirm, ConfirmRequest, Deletion};
pub use event::BoardEvent;

use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::id::{TaskId, UserId};
use crate::storage::{FileStorage, PersistenceAdapter};
use crate::task::{NewTask, Task, TaskPatch, TaskStatus, TaskStore};
use crate::user::{NewUser, User, UserPatch, UserStore};
use crate::{Error, Result};

const EVENT_CAPACITY: usize = 256;

pub struct Board {
    users: UserStore,
    tasks: TaskStore,
    /// Serializes assignment against user deletion
    references: Mutex<()>,
    event_tx: broadcast::Sender<BoardEvent>,
}

impl Board {
    /// Open both stores on the same persistence adapter
    pub async fn open(storage: Arc<dyn PersistenceAdapter>) -> Result<Self> {
        let users = UserStore::open(Arc::clone(&storage)).await?;
        let tasks = TaskStore::open(storage).await?;
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        Ok(Self {
            users,
            tasks,
            references: Mutex::new(()),
            event_tx,
        })
    }

    /// Open a board persisted as JSON files in the configured data directory
    pub async fn open_with_config(config: &Config) -> Result<Self> {
        info!("Using data directory: {:?}", config.data_dir);
        Self::open(Arc::new(FileStorage::new(&config.data_dir))).await
    }

    /// Snapshot of all users in creation order
    pub async fn list_users(&self) -> Vec<User> {
        self.users.list().await
    }

    pub async fn user(&self, id: UserId) -> Option<User> {
        self.users.get(id).await
    }

    pub async fn users_by_age(&self, age: u32) -> Vec<User> {
        self.users.users_by_age(age).await
    }

    /// Snapshot of all tasks in creation order
    pub async fn list_tasks(&self) -> Vec<Task> {
        self.tasks.list().await
    }

    pub async fn task(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(id).await
    }

    pub async fn tasks_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks.tasks_by_status(status).await
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.event_tx.subscribe()
    }

    pub async fn create_user(&self, user: impl Into<NewUser>) -> Result<User> {
        let user = user.into();
        require_text("user name", &user.name)?;

        let user = self.users.create(user).await?;
        self.emit(BoardEvent::UserCreated(user.id));
        Ok(user)
    }

    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<bool> {
        if let Some(name) = &patch.name {
            require_text("user name", name)?;
        }

        let updated = self.users.update(id, patch).await?;
        if updated {
            self.emit(BoardEvent::UserUpdated(id));
        }
        Ok(updated)
    }

    /// Delete a user and clear every task assignment pointing at it.
    ///
    /// Assignments are cleared before the user goes, so no task is ever left
    /// pointing at a deleted user. If the user cannot be deleted the cleared
    /// assignments are put back.
    pub async fn delete_user(&self, id: UserId) -> Result<bool> {
        let _guard = self.references.lock().await;

        if self.users.get(id).await.is_none() {
            return Ok(false);
        }
        let unassigned = self.tasks.clear_assignee(id).await?;

        match self.users.delete(id).await {
            Ok(true) => {}
            Ok(false) => {
                self.restore_assignments(id, &unassigned).await;
                return Ok(false);
            }
            Err(err) => {
                self.restore_assignments(id, &unassigned).await;
                return Err(err);
            }
        }

        info!("Deleted user {} ({} tasks unassigned)", id, unassigned.len());
        self.emit(BoardEvent::UserDeleted { id, unassigned });
        Ok(true)
    }

    /// Ask `confirm` before deleting a user
    pub async fn delete_user_confirmed(&self, id: UserId, confirm: &dyn Confirm) -> Result<Deletion> {
        let Some(user) = self.users.get(id).await else {
            return Ok(Deletion::NotFound);
        };
        let assigned_tasks = self.tasks.tasks_by_assignee(id).await.len();

        let request = ConfirmRequest::DeleteUser {
            id,
            name: user.name,
            assigned_tasks,
        };
        if !confirm.confirm(request).await {
            debug!("Deletion of user {} declined", id);
            return Ok(Deletion::Declined);
        }

        // The user may have gone while the decision was pending
        Ok(if self.delete_user(id).await? {
            Deletion::Deleted
        } else {
            Deletion::NotFound
        })
    }

    pub async fn create_task(&self, task: impl Into<NewTask>) -> Result<Task> {
        let task = task.into();
        require_text("task title", &task.title)?;

        let task = self.tasks.create(task).await?;
        self.emit(BoardEvent::TaskCreated(task.id));
        Ok(task)
    }

    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<bool> {
        if let Some(title) = &patch.title {
            require_text("task title", title)?;
        }

        let updated = self.tasks.update(id, patch).await?;
        if updated {
            self.emit(BoardEvent::TaskUpdated(id));
        }
        Ok(updated)
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<bool> {
        let deleted = self.tasks.delete(id).await?;
        if deleted {
            self.emit(BoardEvent::TaskDeleted(id));
        }
        Ok(deleted)
    }

    /// Ask `confirm` before deleting a task
    pub async fn delete_task_confirmed(&self, id: TaskId, confirm: &dyn Confirm) -> Result<Deletion> {
        let Some(task) = self.tasks.get(id).await else {
            return Ok(Deletion::NotFound);
        };

        let request = ConfirmRequest::DeleteTask {
            id,
            title: task.title,
        };
        if !confirm.confirm(request).await {
            debug!("Deletion of task {} declined", id);
            return Ok(Deletion::Declined);
        }

        Ok(if self.delete_task(id).await? {
            Deletion::Deleted
        } else {
            Deletion::NotFound
        })
    }

    /// Assign a task to an existing user.
    ///
    /// Returns `false` if either the task or the user does not exist.
    pub async fn assign_task(&self, task_id: TaskId, user_id: UserId) -> Result<bool> {
        let _guard = self.references.lock().await;

        if self.users.get(user_id).await.is_none() {
            debug!("Refusing to assign task {} to unknown user {}", task_id, user_id);
            return Ok(false);
        }

        let assigned = self.tasks.assign(task_id, user_id).await?;
        if assigned {
            self.emit(BoardEvent::TaskAssigned {
                task: task_id,
                user: Some(user_id),
            });
        }
        Ok(assigned)
    }

    pub async fn unassign_task(&self, task_id: TaskId) -> Result<bool> {
        let unassigned = self.tasks.unassign(task_id).await?;
        if unassigned {
            self.emit(BoardEvent::TaskAssigned {
                task: task_id,
                user: None,
            });
        }
        Ok(unassigned)
    }

    /// Tasks assigned to a user, in creation order
    pub async fn tasks_for(&self, user_id: UserId) -> Vec<Task> {
        self.tasks.tasks_by_assignee(user_id).await
    }

    async fn restore_assignments(&self, user_id: UserId, task_ids: &[TaskId]) {
        for &task_id in task_ids {
            if let Err(err) = self.tasks.assign(task_id, user_id).await {
                warn!(
                    "Failed to restore assignment of task {} to user {}: {}",
                    task_id, user_id, err
                );
            }
        }
    }

    fn emit(&self, event: BoardEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}
