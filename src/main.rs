use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use truenas_bridge::{config::Config, server};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// TrueNAS host (overrides config)
    #[arg(long, env = "TRUENAS_HOST")]
    truenas_host: Option<String>,

    /// Port to listen on for entity states
    #[arg(short, long, env = "BRIDGE_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "BRIDGE_ADDR")]
    addr: Option<String>,

    /// Poll interval in seconds (overrides config)
    #[arg(long, env = "BRIDGE_POLL_INTERVAL")]
    poll_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting TrueNAS Sensor Bridge v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(host) = args.truenas_host {
        config.truenas.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    if let Some(interval) = args.poll_interval {
        config.polling.interval_seconds = interval;
    }

    info!("Configuration loaded successfully");
    info!("TrueNAS host: {}", config.truenas.host);
    info!("Poll interval: {}s", config.polling.interval_seconds);
    info!(
        "Entity states: http://{}:{}/states",
        config.server.addr, config.server.port
    );

    // Start the bridge
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
