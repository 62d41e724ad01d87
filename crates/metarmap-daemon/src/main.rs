//! metarmapd - always-on daemon driving a METAR map indicator strip

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metarmap_awc::AwcClient;
use metarmap_daemon::config::Config;
use metarmap_daemon::driver::{ConsoleDriver, NullDriver};
use metarmap_daemon::scheduler::DisplayLoop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum DriverKind {
    /// Truecolor blocks on stdout
    Console,
    /// No output; useful for log-only smoke runs
    Null,
}

/// Drive an airport weather map from aviationweather.gov data
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output driver
    #[arg(long, value_enum, default_value = "console")]
    driver: DriverKind,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metarmap_daemon=debug".parse()?)
                .add_directive("metarmap_awc=debug".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let registry = config.registry();
    let stations = registry.station_codes();
    if stations.is_empty() {
        anyhow::bail!("no stations configured; nothing to display");
    }
    tracing::info!(
        "Driving {} slots for {} stations from {}",
        registry.len(),
        stations.len(),
        config.source.base_url
    );

    let client = AwcClient::new(
        &config.source.base_url,
        config.source.format,
        config.connect_timeout(),
        config.read_timeout(),
    );

    let slots = registry.len();
    match args.driver {
        DriverKind::Console => {
            DisplayLoop::new(config, client, ConsoleDriver::new(slots))
                .run()
                .await
        }
        DriverKind::Null => {
            DisplayLoop::new(config, client, NullDriver::new(slots))
                .run()
                .await
        }
    }

    Ok(())
}
