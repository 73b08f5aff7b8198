//! Error types for the core library
//!
//! Domain misses (unknown user or task id) are not errors: the stores report
//! them as `Ok(false)` or `None`. This enum covers persistence failures and
//! input rejected by the board.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
