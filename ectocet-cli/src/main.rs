//! Ectocet CLI
//!
//! Pushes the current folder to an Ectocet project, builds it and prints the
//! URLs of the deployed services.

mod config;
mod credentials;
mod deploy;
mod error;
mod packager;
mod poller;
mod report;
#[cfg(test)]
mod testing;
mod ui;

use anyhow::Result;
use clap::Parser;
use ectocet_client::EctocetClient;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{CliArgs, Config, SECRET_ENV};
use crate::credentials::{TerminalPrompt, resolve_secret};

#[tokio::main]
async fn main() {
    // Logs stay quiet unless RUST_LOG asks for them
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(CliArgs::parse()).await {
        ui::failure(err);
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = Config::from_args(args, std::env::var(SECRET_ENV).ok())?;
    debug!(?config, "Loaded configuration");

    let secret = resolve_secret(config.secret.as_deref(), &TerminalPrompt)?;

    let mut client = EctocetClient::new(&config.origin);
    let deployment =
        deploy::deploy(&mut client, &secret, &config.project_dir, &config.poll).await?;

    debug!(build_id = %deployment.build_id, "Deployment finished");

    let urls = report::service_urls(
        &deployment.project,
        &deployment.result,
        &config.root_domain,
    );
    report::print_service_urls(&urls);

    Ok(())
}
