//! Expense records

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Expense row as stored in the `expenses` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Expense {
    pub id: i64,
    pub user_email: String,
    pub event_name: String,
    pub cost: f64,
    pub timestamp: DateTime<Utc>,
    pub receipt_url: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Values for a row that has not been inserted yet.
///
/// `id` and `timestamp` are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_email: String,
    pub event_name: String,
    pub cost: f64,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl NewExpense {
    /// Materialize the row the store would return after insert.
    pub fn into_expense(self, id: i64, timestamp: DateTime<Utc>) -> Expense {
        Expense {
            id,
            user_email: self.user_email,
            event_name: self.event_name,
            cost: self.cost,
            timestamp,
            receipt_url: None,
            name: self.name,
            role: self.role,
        }
    }
}

/// A distinct (email, name, role) triple seen across expenses
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, FromRow)]
pub struct UserSummary {
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_expense_has_no_receipt() {
        let now = Utc::now();
        let expense = NewExpense {
            user_email: "a@x.com".into(),
            event_name: "Lunch".into(),
            cost: 12.5,
            name: Some("A".into()),
            role: Some("member".into()),
        }
        .into_expense(7, now);

        assert_eq!(expense.id, 7);
        assert_eq!(expense.timestamp, now);
        assert_eq!(expense.receipt_url, None);
        assert_eq!(expense.role.as_deref(), Some("member"));
    }

    #[test]
    fn user_summary_orders_missing_values_first() {
        let bare = UserSummary {
            email: "a@x.com".into(),
            name: None,
            role: None,
        };
        let named = UserSummary {
            email: "a@x.com".into(),
            name: Some("A".into()),
            role: None,
        };
        assert!(bare < named);
    }
}
