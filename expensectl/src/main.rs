//! expensectl - run and maintain the expense tracker backend
//!
//! - `serve`: HTTP API over PostgreSQL (or in memory with `--ephemeral`)
//! - `migrate`: create the expenses schema and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{LogFormat, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "expensectl",
    author,
    version,
    about = "Expense tracker backend: expenses, receipts and role events over HTTP"
)]
struct Cli {
    /// Debug logging (when RUST_LOG is unset)
    #[arg(long, global = true)]
    debug: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, env = "LOG_FORMAT", default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or update the database schema, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        format: cli.log_format,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
