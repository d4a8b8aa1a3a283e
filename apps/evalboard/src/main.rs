use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use evalboard::api_client::ApiClient;
use evalboard::cli::{self, Cli};
use evalboard::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so command output stays clean on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();

    let mut client_config = config.client_config();
    if let Some(url) = &args.api_url {
        client_config.base_url = url.clone();
    }

    info!(
        "evalboard v{} using {} (timeout {:?})",
        env!("CARGO_PKG_VERSION"),
        client_config.base_url,
        client_config.timeout
    );

    let client = ApiClient::new(&client_config).context("Failed to build HTTP client")?;

    if let Err(e) = cli::run(args, &client).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
