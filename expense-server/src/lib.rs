//! expense-server: HTTP backend for the expense tracker
//!
//! Stores expenses in a single PostgreSQL table and exposes them over a
//! small JSON API, together with role change and handler grant events
//! that share the same table.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError, HandlerSecret};
pub use db::{DbError, ExpenseRepo, ExpenseStore, MemoryExpenseStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerError};
