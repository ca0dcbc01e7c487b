//! Persistence layer using an append-only command log

use crate::persistence::{CommandLog, PersistenceError};
use crate::Processor;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Append-only log of every mutating command, one raw command line per
/// line, in the order the commands were executed
pub struct AppendLog {
    log_file: Mutex<File>,
    log_path: PathBuf,
}

impl AppendLog {
    /// Open (or create) the log file for appending
    pub async fn open<P: AsRef<Path>>(log_path: P) -> Result<AppendLog, PersistenceError> {
        let log_path = log_path.as_ref().to_path_buf();
        debug!("Opening log file: {:?}", log_path);

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .await
            .map_err(|e| PersistenceError::io(&log_path, e))?;

        info!("Append log opened: {:?}", log_path);

        Ok(AppendLog {
            log_file: Mutex::new(log_file),
            log_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Replay every logged command, top to bottom, through `processor`.
    ///
    /// Replies are discarded and nothing is re-logged. Blank lines are
    /// skipped. The first line that fails to execute aborts the replay.
    pub async fn replay(&self, processor: &Processor) -> Result<usize, PersistenceError> {
        let file = File::open(&self.log_path)
            .await
            .map_err(|e| PersistenceError::io(&self.log_path, e))?;

        let mut lines = BufReader::new(file).lines();
        let mut line_no = 0;
        let mut recovered = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| PersistenceError::io(&self.log_path, e))?
        {
            line_no += 1;

            if line.is_empty() {
                continue;
            }

            processor
                .execute_line(&line)
                .map_err(|source| PersistenceError::Replay {
                    line_no,
                    line: line.clone(),
                    source,
                })?;
            recovered += 1;
        }

        info!("Recovered {} commands from {:?}", recovered, self.log_path);
        Ok(recovered)
    }
}

#[async_trait]
impl CommandLog for AppendLog {
    /// Append one command line and flush it out to the file
    async fn append(&self, line: String) -> Result<(), PersistenceError> {
        let mut log_file = self.log_file.lock().await;

        log_file
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .map_err(|e| PersistenceError::io(&self.log_path, e))?;
        log_file
            .flush()
            .await
            .map_err(|e| PersistenceError::io(&self.log_path, e))?;

        Ok(())
    }
}
