use crate::{DEFAULT_HOST, DEFAULT_PORT};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Snapshots are never taken more often than this
pub const MIN_BACKUP_INTERVAL: Duration = Duration::from_secs(1);

pub const SNAPSHOT_FILE_NAME: &str = "backup-rdb.json";
pub const APPEND_LOG_FILE_NAME: &str = "backup-aof.txt";

/// Command-line arguments for the server
#[derive(Parser, Debug)]
#[command(name = "linekv")]
#[command(about = "Line-protocol key-value store", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Host to bind to
    #[arg(long, env = "LINEKV_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "LINEKV_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable persistence
    #[arg(long, env = "LINEKV_PERSISTENCE")]
    pub persistence: bool,

    /// Persistence strategy, only used with --persistence
    #[arg(long, env = "LINEKV_BACKUP_TYPE", value_enum, default_value_t = BackupType::Snapshot)]
    pub backup_type: BackupType,

    /// Directory holding the snapshot or the append log
    #[arg(short, long, env = "LINEKV_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Snapshot interval in seconds (minimum 1)
    #[arg(long, env = "LINEKV_BACKUP_INTERVAL", default_value_t = 1)]
    pub backup_interval: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LINEKV_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Which persistence strategy the server runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackupType {
    /// Periodic full snapshot of the store
    Snapshot,
    /// Append-only log of mutating commands, replayed at startup
    Aof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:63790")
    pub addr: String,
    /// `None` runs the store purely in memory
    pub persistence: Option<PersistenceConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceConfig {
    pub backup_type: BackupType,
    pub data_dir: PathBuf,
    interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT),
            persistence: None,
        }
    }
}

impl ServerConfig {
    pub fn with_persistence(mut self, persistence: PersistenceConfig) -> Self {
        self.persistence = Some(persistence);
        self
    }
}

impl PersistenceConfig {
    /// Intervals below `MIN_BACKUP_INTERVAL` are raised to it
    pub fn new(backup_type: BackupType, data_dir: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            backup_type,
            data_dir: data_dir.into(),
            interval: interval.max(MIN_BACKUP_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE_NAME)
    }

    pub fn append_log_path(&self) -> PathBuf {
        self.data_dir.join(APPEND_LOG_FILE_NAME)
    }
}

impl From<&CliArgs> for ServerConfig {
    fn from(args: &CliArgs) -> Self {
        let persistence = args.persistence.then(|| {
            PersistenceConfig::new(
                args.backup_type,
                args.data_dir.clone(),
                Duration::from_secs(args.backup_interval),
            )
        });

        Self {
            addr: format!("{}:{}", args.host, args.port),
            persistence,
        }
    }
}
