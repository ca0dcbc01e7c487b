use chrono::Utc;
use clap::Parser;
use linekv::config::{CliArgs, ServerConfig};
use linekv::server;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::EnvFilter;

struct ChronoUtc;

impl FormatTime for ChronoUtc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        // Format as RFC3339 UTC
        write!(w, "{}", Utc::now().to_rfc3339())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(ChronoUtc)
        .init();

    let config = ServerConfig::from(&args);
    match &config.persistence {
        Some(persistence) => info!(
            "Persistence: {:?} in {}",
            persistence.backup_type,
            persistence.data_dir.display()
        ),
        None => info!("Persistence disabled"),
    }

    let listener = TcpListener::bind(&config.addr).await?;
    info!("Listening on {}", config.addr);

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to install ctrl-c handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    if let Err(err) = server::run(listener, config, shutdown).await {
        error!("Server error: {}", err);
        return Err(err.into());
    }

    Ok(())
}
