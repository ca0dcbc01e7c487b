pub mod client;
pub use client::Client;
pub use client::ClientError;
pub mod cmd;
pub mod config;
pub use config::{BackupType, PersistenceConfig, ServerConfig};
pub mod connection;
pub use connection::Connection;
pub use connection::ConnectionBase;
pub use connection::MockConnectionBase;
pub mod data_store;
pub use data_store::DataType;
pub use data_store::MockSharedStoreBase;
pub use data_store::SharedStore;
pub use data_store::SharedStoreBase;
pub mod list;
pub use list::List;
pub mod persistence;
pub use persistence::{CommandLog, MockCommandLog};
pub mod processor;
pub use processor::Processor;
pub mod protocol_handler;
pub use protocol_handler::deserialize_buffer;
pub use protocol_handler::serialize_reply;
pub use protocol_handler::Reply;
pub mod server;
pub mod set;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 63790;

/// Record terminator on the wire, for both commands and replies.
pub const LINE_SUFFIX: &str = "\t\n";

/// Result type for server-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the server or a single connection
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Persistence(#[from] persistence::PersistenceError),

    #[error(transparent)]
    Frame(#[from] connection::FrameError),
}
