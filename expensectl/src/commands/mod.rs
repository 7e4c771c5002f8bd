//! Command implementations for expensectl

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use expense_server::db::{create_pool_with_options, migrations};
use expense_server::{AppConfig, ExpenseRepo};

/// Connect to PostgreSQL and bring the schema up to date.
pub(crate) async fn connect(config: &AppConfig) -> Result<ExpenseRepo> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool_with_options(database_url, config.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply expense schema")?;

    Ok(ExpenseRepo::new(pool))
}
