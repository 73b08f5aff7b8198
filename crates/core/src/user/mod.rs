//! User module
//!
//! This module contains user-related types and the user store.

mod model;
mod store;

pub use model::*;
pub use store::UserStore;
