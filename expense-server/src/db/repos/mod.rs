//! Repository implementations for database access

pub mod expenses;

pub use expenses::ExpenseRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub fn expense_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Expense",
            id: id.to_string(),
        }
    }
}
