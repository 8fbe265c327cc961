//! Restaurant Directory command-line client
//!
//! Browse, filter and edit restaurants served by the Restaurant Directory REST API.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use restaurant_directory::cli::{self, Cli, OutputFormat};
use restaurant_directory::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration, then apply command-line overrides
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);

    // Initialize logging; JSON output gets JSON logs on stderr
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let json_logs = cli.format == OutputFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
        }))
        .init();

    tracing::debug!("Backend URL: {}", config.api_url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(cli::execute(cli, config))
}
