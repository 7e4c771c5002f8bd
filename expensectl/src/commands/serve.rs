//! HTTP server command
//!
//! Settings come from the environment (and `.env`); flags override them.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use expense_server::{run_server, AppConfig, ExpenseStore, HandlerSecret, MemoryExpenseStore};

use super::connect;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (env: EXPENSES_BIND, default: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Secret code accepted by /become_handler (overrides HANDLER_SECRET_CODE)
    #[arg(long)]
    pub handler_secret: Option<String>,

    /// Maximum pooled database connections (env: DATABASE_MAX_CONNECTIONS)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_connections: Option<u32>,

    /// Keep expenses in memory instead of PostgreSQL; data is lost on exit
    #[arg(long, conflicts_with = "database_url")]
    pub ephemeral: bool,
}

impl ServeArgs {
    fn apply(self, config: &mut AppConfig) -> bool {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = self.database_url {
            config.database_url = Some(url);
        }
        if let Some(secret) = self.handler_secret {
            config.handler_secret = HandlerSecret::new(secret);
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        self.ephemeral
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = AppConfig::from_env().context("Invalid server configuration")?;
    let ephemeral = args.apply(&mut config);

    let store: Arc<dyn ExpenseStore> = if ephemeral {
        tracing::warn!("Ephemeral mode: expenses are kept in memory and lost on exit");
        Arc::new(MemoryExpenseStore::new())
    } else {
        Arc::new(connect(&config).await?)
    };

    tracing::info!("Starting expense server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(store, &config).await.context("Server error")?;

    Ok(())
}
