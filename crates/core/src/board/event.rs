//! Change notifications

use crate::id::{TaskId, UserId};

/// Emitted once per successful board mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    UserCreated(UserId),
    UserUpdated(UserId),
    /// The user is gone and `unassigned` lists the tasks that pointed at it
    UserDeleted {
        id: UserId,
        unassigned: Vec<TaskId>,
    },
    TaskCreated(TaskId),
    TaskUpdated(TaskId),
    TaskDeleted(TaskId),
    /// `user` is `None` when the assignment was cleared
    TaskAssigned {
        task: TaskId,
        user: Option<UserId>,
    },
}
