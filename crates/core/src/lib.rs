//! Core library for taskboard
//!
//! This crate contains the user and task stores, including:
//! - Entity models and their patches
//! - Insertion-ordered, write-through collections
//! - The persistence seam and its file and in-memory adapters
//! - The board composing both stores

pub mod board;
mod collection;
pub mod config;
pub mod error;
pub mod id;
pub mod storage;
pub mod task;
pub mod user;

pub use board::Board;
pub use config::Config;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
