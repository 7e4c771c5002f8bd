//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use expense_server::AppConfig;

use super::connect;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Create the expenses table and indexes, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let mut config = AppConfig::from_env().context("Invalid server configuration")?;
    if let Some(url) = args.database_url {
        config.database_url = Some(url);
    }

    connect(&config).await?;
    println!("expenses schema is up to date");
    Ok(())
}
