//! Durability for the store: a periodic full snapshot, or an append-only
//! log of mutating commands that is replayed at startup. Only one of the
//! two is ever active.

mod append_log;
pub use append_log::AppendLog;

mod snapshot;
pub use snapshot::{Collection, SnapshotManager, SnapshotValue};

use crate::cmd::CommandError;
use async_trait::async_trait;
use mockall::automock;

/// Sink for commands that completed and changed the store
#[automock]
#[async_trait]
pub trait CommandLog: Send + Sync {
    async fn append(&self, line: String) -> Result<(), PersistenceError>;
}

/// Errors that can occur during persistence operations.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error at '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("corrupt snapshot '{path}': {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("replay failed at line {line_no} '{line}': {source}")]
    Replay {
        line_no: usize,
        line: String,
        source: CommandError,
    },
}

impl PersistenceError {
    fn io(path: &std::path::Path, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
