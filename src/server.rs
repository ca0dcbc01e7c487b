use crate::config::{BackupType, PersistenceConfig, ServerConfig};
use crate::persistence::{AppendLog, PersistenceError, SnapshotManager};
use crate::{Connection, ConnectionBase, Processor, SharedStore};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Server listener state. Created in the `run` call. It includes a `run` method
/// which performs the TCP listening and initialization of per-connection state.
struct Listener {
    listener: TcpListener,

    /// Holds the processor (and through it the data store) around an `Arc`
    /// This is shared across each `ConnectionHandler`
    processor: Arc<Processor>,
}

/// Per-connection handler. Reads command lines from the connection,
/// passes them to the `Processor` and writes the replies back.
pub struct ConnectionHandler<C: ConnectionBase> {
    connection: C,
    processor: Arc<Processor>,
}

impl Listener {
    /// Run the server
    ///
    /// Listen for inbound connections until `shutdown` completes. For each
    /// inbound connection, spawn a tokio task to process that connection.
    /// Connections that are already open keep running after shutdown; only
    /// the listening socket is closed.
    async fn run(self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Listener shutting down");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((socket, peer)) => {
                            info!("Connection from {}", peer);

                            let mut handler = ConnectionHandler::new(
                                Connection::new(socket),
                                Arc::clone(&self.processor),
                            );

                            tokio::spawn(async move {
                                match handler.run().await {
                                    Ok(()) => debug!("Connection from {} closed", peer),
                                    Err(err) => warn!("Connection from {} failed: {}", peer, err),
                                }
                            });
                        }
                        // Accept errors are not fatal to the listener
                        Err(err) => error!("Failed to accept connection: {}", err),
                    }
                }
            }
        }
    }
}

impl<C: ConnectionBase> ConnectionHandler<C> {
    pub fn new(connection: C, processor: Arc<Processor>) -> ConnectionHandler<C> {
        ConnectionHandler {
            connection,
            processor,
        }
    }

    /// Process a single connection.
    ///
    /// Lines are read and processed one at a time, in arrival order. Command
    /// failures become `Error:` replies; only a read or write fault ends the
    /// connection with an error. A clean end of stream returns `Ok`.
    pub async fn run(&mut self) -> crate::Result<()> {
        loop {
            let line = match self.connection.read_line().await? {
                Some(line) => line,
                None => return Ok(()),
            };

            let reply = self.processor.process(&line).await;

            self.connection.write_reply(&reply).await?;
        }
    }
}

/// Run the server on an already bound listener until `shutdown` completes.
///
/// Persistence is recovered before the first connection is accepted. A
/// corrupt snapshot or an append log that cannot be opened or replayed is
/// returned as an error and no connection is ever accepted.
pub async fn run(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: impl Future<Output = ()>,
) -> crate::Result<()> {
    let shared_store = SharedStore::new();
    let mut processor = Processor::new(shared_store.clone());
    let mut snapshot_task: Option<(Arc<SnapshotManager>, JoinHandle<()>)> = None;

    if let Some(persistence) = &config.persistence {
        prepare_data_dir(persistence).await?;

        match persistence.backup_type {
            BackupType::Snapshot => {
                let manager = Arc::new(SnapshotManager::new(
                    shared_store.clone(),
                    persistence.snapshot_path(),
                    persistence.interval(),
                ));
                manager.load()?;

                let handle = tokio::spawn(Arc::clone(&manager).run());
                snapshot_task = Some((manager, handle));
            }
            BackupType::Aof => {
                let append_log = AppendLog::open(persistence.append_log_path()).await?;
                append_log.replay(&processor).await?;

                processor = processor.with_command_log(Arc::new(append_log));
            }
        }
    }

    info!("Server started at {}", listener.local_addr()?);

    let server = Listener {
        listener,
        processor: Arc::new(processor),
    };
    server.run(shutdown).await;

    // Final snapshot on clean shutdown
    if let Some((manager, handle)) = snapshot_task {
        handle.abort();
        let _ = handle.await;

        match tokio::task::spawn_blocking(move || manager.save()).await {
            Ok(Ok(_)) => {}
            Ok(Err(err)) => error!("Final snapshot failed: {}", err),
            Err(err) => error!("Final snapshot task panicked: {}", err),
        }
    }

    Ok(())
}

async fn prepare_data_dir(persistence: &PersistenceConfig) -> Result<(), PersistenceError> {
    tokio::fs::create_dir_all(&persistence.data_dir)
        .await
        .map_err(|e| PersistenceError::Io {
            path: persistence.data_dir.display().to_string(),
            source: e,
        })
}
