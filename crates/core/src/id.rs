//! Identifier types and the shared id allocation policy
//!
//! Both collections use a monotonically increasing counter starting at 1.
//! A value handed out is never handed out again by the same sequence, even
//! after the entity carrying it is deleted.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw counter value
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`User`](crate::user::User)
    UserId
);

entity_id!(
    /// Identifier of a [`Task`](crate::task::Task)
    TaskId
);

/// Counter handing out collection-unique ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    /// `None` once `u64::MAX` has been handed out
    next: Option<u64>,
}

impl IdSequence {
    /// A fresh sequence, first id is 1
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// A sequence that resumes after the largest of `used`.
    ///
    /// Returns `None` if the largest is `u64::MAX`, leaving nothing to resume with.
    pub fn after(used: impl IntoIterator<Item = u64>) -> Option<Self> {
        let next = match used.into_iter().max() {
            Some(max) => max.checked_add(1)?,
            None => 1,
        };
        Some(Self { next: Some(next) })
    }

    /// Take the next id, `None` when the sequence is exhausted
    pub fn allocate(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    /// The id the next call to [`allocate`](Self::allocate) will return
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
