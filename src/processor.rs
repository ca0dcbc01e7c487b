use crate::cmd::{Command, CommandError};
use crate::{CommandLog, Reply, SharedStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Turns command lines into replies.
///
/// Live traffic goes through `process`, which also records mutating
/// commands in the command log when one is attached. Recovery goes through
/// `execute_line`, the same parse-and-execute path without the logging.
#[derive(Clone)]
pub struct Processor {
    shared_store: SharedStore,
    command_log: Option<Arc<dyn CommandLog>>,

    /// Held from execution to append for every logged command, so the log
    /// order is the execution order
    log_order: Arc<Mutex<()>>,
}

impl Processor {
    pub fn new(shared_store: SharedStore) -> Processor {
        Processor {
            shared_store,
            command_log: None,
            log_order: Arc::new(Mutex::new(())),
        }
    }

    /// Record every successful mutating command in `command_log`
    pub fn with_command_log(mut self, command_log: Arc<dyn CommandLog>) -> Processor {
        self.command_log = Some(command_log);
        self
    }

    pub fn shared_store(&self) -> &SharedStore {
        &self.shared_store
    }

    /// Parse and execute one line, without logging it
    pub fn execute_line(&self, line: &str) -> Result<String, CommandError> {
        Command::infer_command(line)?.execute(&self.shared_store)
    }

    /// Parse and execute one line of live traffic.
    ///
    /// A mutating command that succeeds is appended to the command log
    /// before this returns, so the reply is only sent once the command is
    /// on disk. Execution and append happen under one lock, so concurrent
    /// mutations reach the log in the order they touched the store. A
    /// failed append is logged and the reply still goes out.
    pub async fn process(&self, line: &str) -> Reply {
        debug!("Message incoming: {}", line);

        let result = match Command::infer_command(line) {
            Ok(cmd) => match &self.command_log {
                Some(command_log) if cmd.is_mutating() => {
                    let _order = self.log_order.lock().await;

                    let result = cmd.execute(&self.shared_store);
                    if result.is_ok() {
                        if let Err(err) = command_log.append(line.to_string()).await {
                            error!("Append to command log failed: {}", err);
                        }
                    }
                    result
                }
                _ => cmd.execute(&self.shared_store),
            },
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(reply) => Reply::Text(reply),
            Err(err) => Reply::Error(err.to_string()),
        }
    }
}
