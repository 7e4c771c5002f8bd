//! Expense repository backed by PostgreSQL
//!
//! - create / update: single statement with RETURNING
//! - delete: rows_affected decides not-found, no pre-check

use async_trait::async_trait;
use sqlx::PgPool;

use super::DbError;
use crate::db::ExpenseStore;
use crate::models::{Expense, NewExpense, UserSummary};

const EXPENSE_COLUMNS: &str =
    "id, user_email, event_name, cost, timestamp, receipt_url, name, role";

/// Expense repository
#[derive(Clone)]
pub struct ExpenseRepo {
    pool: PgPool,
}

impl ExpenseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepo {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn create(&self, expense: NewExpense) -> Result<Expense, DbError> {
        let sql = format!(
            r#"
            INSERT INTO expenses (user_email, event_name, cost, name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {EXPENSE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, Expense>(&sql)
            .bind(&expense.user_email)
            .bind(&expense.event_name)
            .bind(expense.cost)
            .bind(expense.name.as_deref())
            .bind(expense.role.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list_for_user(&self, user_email: &str) -> Result<Vec<Expense>, DbError> {
        let sql = format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            WHERE user_email = $1
            ORDER BY timestamp DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, Expense>(&sql)
            .bind(user_email)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<Expense>, DbError> {
        let sql = format!(
            r#"
            SELECT {EXPENSE_COLUMNS}
            FROM expenses
            ORDER BY timestamp DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, Expense>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::expense_not_found(id));
        }
        Ok(())
    }

    async fn delete_for_user(&self, user_email: &str) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM expenses WHERE user_email = $1")
            .bind(user_email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn update_receipt(&self, id: i64, receipt_url: &str) -> Result<Expense, DbError> {
        let sql = format!(
            r#"
            UPDATE expenses
            SET receipt_url = $2
            WHERE id = $1
            RETURNING {EXPENSE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Expense>(&sql)
            .bind(id)
            .bind(receipt_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::expense_not_found(id))
    }

    async fn distinct_users(&self) -> Result<Vec<UserSummary>, DbError> {
        let rows = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT DISTINCT user_email AS email, name, role
            FROM expenses
            WHERE user_email IS NOT NULL
            ORDER BY email, name NULLS FIRST, role NULLS FIRST
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p expense-server -- --ignored

    async fn repo() -> ExpenseRepo {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        ExpenseRepo::new(pool)
    }

    fn unique_email() -> String {
        format!("{}@test.local", uuid::Uuid::new_v4())
    }

    fn lunch(user_email: &str, cost: f64) -> NewExpense {
        NewExpense {
            user_email: user_email.to_owned(),
            event_name: "Lunch".into(),
            cost,
            name: Some("A".into()),
            role: Some("member".into()),
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_list_newest_first() {
        let repo = repo().await;
        let email = unique_email();

        let first = repo.create(lunch(&email, 1.0)).await.unwrap();
        let second = repo.create(lunch(&email, 2.0)).await.unwrap();

        let listed = repo.list_for_user(&email).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(listed[0].timestamp >= listed[1].timestamp);

        repo.delete_for_user(&email).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_id_is_not_found() {
        let repo = repo().await;
        let err = repo.delete(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_receipt_round_trips() {
        let repo = repo().await;
        let email = unique_email();
        let created = repo.create(lunch(&email, 3.0)).await.unwrap();

        let updated = repo
            .update_receipt(created.id, "https://r.example/1.png")
            .await
            .unwrap();
        assert_eq!(updated.receipt_url.as_deref(), Some("https://r.example/1.png"));

        let err = repo.update_receipt(i64::MAX, "x").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        repo.delete_for_user(&email).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bulk_delete_is_idempotent() {
        let repo = repo().await;
        let email = unique_email();
        let other = unique_email();
        repo.create(lunch(&email, 1.0)).await.unwrap();
        repo.create(lunch(&email, 2.0)).await.unwrap();
        repo.create(lunch(&other, 3.0)).await.unwrap();

        assert_eq!(repo.delete_for_user(&email).await.unwrap(), 2);
        assert_eq!(repo.delete_for_user(&email).await.unwrap(), 0);
        assert_eq!(repo.list_for_user(&other).await.unwrap().len(), 1);

        repo.delete_for_user(&other).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn distinct_users_collapse_duplicates_nulls_first() {
        let repo = repo().await;
        let email = unique_email();
        let named = || NewExpense {
            user_email: email.clone(),
            event_name: "Lunch".into(),
            cost: 1.0,
            name: Some("Z".into()),
            role: Some("m".into()),
        };
        repo.create(named()).await.unwrap();
        repo.create(named()).await.unwrap();
        repo.create(NewExpense {
            name: None,
            role: None,
            ..named()
        })
        .await
        .unwrap();

        let mine: Vec<UserSummary> = repo
            .distinct_users()
            .await
            .unwrap()
            .into_iter()
            .filter(|u| u.email == email)
            .collect();
        assert_eq!(
            mine,
            vec![
                UserSummary {
                    email: email.clone(),
                    name: None,
                    role: None,
                },
                UserSummary {
                    email: email.clone(),
                    name: Some("Z".into()),
                    role: Some("m".into()),
                },
            ]
        );

        repo.delete_for_user(&email).await.unwrap();
    }
}
