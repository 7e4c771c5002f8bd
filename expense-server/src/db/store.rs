//! Storage seam between the HTTP layer and the expenses table

use async_trait::async_trait;

use super::DbError;
use crate::models::{Expense, NewExpense, UserSummary};

/// Operations on the expenses table.
///
/// Listings are ordered newest first, ties broken by descending id.
/// Operations addressing a single id fail with `DbError::NotFound`
/// when no such row exists.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Short label for logs
    fn kind(&self) -> &'static str;

    /// Insert a row, assigning id and timestamp.
    async fn create(&self, expense: NewExpense) -> Result<Expense, DbError>;

    async fn list_for_user(&self, user_email: &str) -> Result<Vec<Expense>, DbError>;

    async fn list_all(&self) -> Result<Vec<Expense>, DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;

    /// Delete every row for `user_email`, returning how many went.
    /// Zero matches is not an error.
    async fn delete_for_user(&self, user_email: &str) -> Result<u64, DbError>;

    async fn update_receipt(&self, id: i64, receipt_url: &str) -> Result<Expense, DbError>;

    /// Distinct (email, name, role) triples, sorted with absent values first.
    async fn distinct_users(&self) -> Result<Vec<UserSummary>, DbError>;
}
