//! Delete confirmation
//!
//! Destructive operations can be gated on a decision from whatever drives the
//! board. The board sends a [`ConfirmRequest`] and only proceeds once the
//! answer is `true`.

use async_trait::async_trait;

use crate::id::{TaskId, UserId};

/// What the board is asking permission for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    DeleteUser {
        id: UserId,
        name: String,
        /// Number of tasks that will lose their assignee
        assigned_tasks: usize,
    },
    DeleteTask {
        id: TaskId,
        title: String,
    },
}

/// Source of yes/no decisions
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, request: ConfirmRequest) -> bool;
}

/// Result of a confirmation-gated delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Declined,
    NotFound,
}
