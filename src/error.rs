//! Error taxonomy for the browser-facing side effects.
//!
//! Route decoding and encoding cannot fail; only the platform calls around
//! them (history API, local storage) can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("history API unavailable")]
    HistoryUnavailable,

    #[error("history update rejected: {0}")]
    HistoryRejected(String),

    #[error("local storage unavailable")]
    StorageUnavailable,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("malformed session: {0}")]
    Session(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
