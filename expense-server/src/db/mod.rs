//! Database layer - connection pool, schema and stores
//!
//! # Design Principles
//!
//! - Connection pool, one pooled connection per statement
//! - Single-statement writes with RETURNING, no read-then-write
//! - Missing rows surface as `DbError::NotFound`

pub mod pool;
pub mod migrations;
pub mod store;
pub mod memory;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use store::ExpenseStore;
pub use memory::MemoryExpenseStore;
pub use repos::{DbError, ExpenseRepo};
