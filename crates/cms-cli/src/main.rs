//! `cms` command line tool
//!
//! Prints the asset listing query for a filter state, optionally runs it,
//! and deletes menu items.

mod cli;
mod commands;

use clap::Parser;
use cms_core::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,cms_db=debug,cms_queries=debug,cms_services=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Assets { filter, execute } => {
            let config = if execute {
                AppConfig::from_env_required()?
            } else {
                AppConfig::from_env()?
            };
            commands::assets::run(&config, filter, execute).await
        }
        Commands::Actions { component } => commands::actions::run(component.as_deref()),
        Commands::DeleteMenuItem { id, children } => {
            let config = AppConfig::from_env_required()?;
            commands::menu_items::delete(&config, id, children).await
        }
    }
}
