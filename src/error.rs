//! Error type for configuration and transcript output.
//!
//! Replay itself never fails: running past the end of a step table is
//! reported as [`crate::Advance::Completed`], not as an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{MAX_INTERVAL_MS, MIN_INTERVAL_MS};

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "tick interval {millis}ms is outside {}..={}ms",
        MIN_INTERVAL_MS,
        MAX_INTERVAL_MS
    )]
    InvalidInterval { millis: u64 },

    #[error("unknown script '{0}' (expected 'early' or 'late')")]
    UnknownScript(String),

    #[error("cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
