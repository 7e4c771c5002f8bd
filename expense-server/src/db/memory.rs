//! In-process expense store
//!
//! Backs `expensectl serve --ephemeral` and the router tests. Rows live in
//! a `BTreeMap` keyed by id behind a `tokio::sync::RwLock`; nothing is
//! persisted.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{DbError, ExpenseStore};
use crate::models::{Expense, NewExpense, UserSummary};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Expense>,
}

/// Expense store held entirely in memory
#[derive(Default)]
pub struct MemoryExpenseStore {
    table: RwLock<Table>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<'a>(rows: impl Iterator<Item = &'a Expense>) -> Vec<Expense> {
    let mut rows: Vec<Expense> = rows.cloned().collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    rows
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, expense: NewExpense) -> Result<Expense, DbError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        let row = expense.into_expense(id, Utc::now());
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn list_for_user(&self, user_email: &str) -> Result<Vec<Expense>, DbError> {
        let table = self.table.read().await;
        Ok(newest_first(
            table.rows.values().filter(|e| e.user_email == user_email),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Expense>, DbError> {
        let table = self.table.read().await;
        Ok(newest_first(table.rows.values()))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::expense_not_found(id))
    }

    async fn delete_for_user(&self, user_email: &str) -> Result<u64, DbError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, e| e.user_email != user_email);
        Ok((before - table.rows.len()) as u64)
    }

    async fn update_receipt(&self, id: i64, receipt_url: &str) -> Result<Expense, DbError> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::expense_not_found(id))?;
        row.receipt_url = Some(receipt_url.to_owned());
        Ok(row.clone())
    }

    async fn distinct_users(&self) -> Result<Vec<UserSummary>, DbError> {
        let table = self.table.read().await;
        let users: BTreeSet<UserSummary> = table
            .rows
            .values()
            .map(|e| UserSummary {
                email: e.user_email.clone(),
                name: e.name.clone(),
                role: e.role.clone(),
            })
            .collect();
        Ok(users.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(user_email: &str, name: &str, role: &str) -> NewExpense {
        NewExpense {
            user_email: user_email.to_owned(),
            event_name: "Taxi".into(),
            cost: 9.0,
            name: Some(name.to_owned()),
            role: Some(role.to_owned()),
        }
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let store = MemoryExpenseStore::new();
        let a = store.create(expense("a@x.com", "A", "member")).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(expense("a@x.com", "A", "member")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = MemoryExpenseStore::new();
        for _ in 0..3 {
            store.create(expense("a@x.com", "A", "member")).await.unwrap();
        }

        let rows = store.list_all().await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn distinct_users_collapses_duplicates() {
        let store = MemoryExpenseStore::new();
        store.create(expense("b@x.com", "B", "member")).await.unwrap();
        store.create(expense("a@x.com", "A", "member")).await.unwrap();
        store.create(expense("a@x.com", "A", "member")).await.unwrap();
        store.create(expense("a@x.com", "A", "handler")).await.unwrap();

        let users = store.distinct_users().await.unwrap();
        let triples: Vec<(&str, Option<&str>)> = users
            .iter()
            .map(|u| (u.email.as_str(), u.role.as_deref()))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("a@x.com", Some("handler")),
                ("a@x.com", Some("member")),
                ("b@x.com", Some("member")),
            ]
        );
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryExpenseStore::new();
        assert!(matches!(
            store.delete(42).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            store.update_receipt(42, "x").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
