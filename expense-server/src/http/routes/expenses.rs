//! Expense endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::Ack;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, ExpenseId};
use crate::http::server::AppState;
use crate::models::{Expense, NewExpense};

/// Create expense request. Every field is required.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub user_email: String,
    pub event_name: String,
    pub cost: f64,
    pub name: String,
    pub role: String,
}

impl From<CreateExpenseRequest> for NewExpense {
    fn from(req: CreateExpenseRequest) -> Self {
        Self {
            user_email: req.user_email,
            event_name: req.event_name,
            cost: req.cost,
            name: Some(req.name),
            role: Some(req.role),
        }
    }
}

/// `?user_email=` filter
#[derive(Debug, Deserialize)]
pub struct UserEmailQuery {
    pub user_email: String,
}

/// Receipt patch body.
///
/// Accepts a bare JSON string or `{"receipt_url": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReceiptUpdate {
    Bare(String),
    Wrapped { receipt_url: String },
}

impl ReceiptUpdate {
    pub fn into_url(self) -> String {
        match self {
            Self::Bare(url) | Self::Wrapped { receipt_url: url } => url,
        }
    }
}

/// Expense response
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub user_email: String,
    pub event_name: String,
    pub cost: f64,
    pub timestamp: String,
    pub receipt_url: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            user_email: e.user_email,
            event_name: e.event_name,
            cost: e.cost,
            timestamp: e.timestamp.to_rfc3339(),
            receipt_url: e.receipt_url,
            name: e.name,
            role: e.role,
        }
    }
}

fn respond_list(rows: Vec<Expense>) -> Json<Vec<ExpenseResponse>> {
    Json(rows.into_iter().map(ExpenseResponse::from).collect())
}

/// POST /expenses - record an expense
async fn create_expense(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = state.store.create(req.into()).await?;
    tracing::info!(expense_id = expense.id, user_email = %expense.user_email, "expense created");
    Ok(Json(ExpenseResponse::from(expense)))
}

/// GET /expenses?user_email= - list one user's expenses, newest first
async fn list_expenses(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UserEmailQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let rows = state.store.list_for_user(&query.user_email).await?;
    Ok(respond_list(rows))
}

/// GET /expenses/all - list every expense, newest first
async fn list_all_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let rows = state.store.list_all().await?;
    Ok(respond_list(rows))
}

/// DELETE /expenses/{id}
async fn delete_expense(
    State(state): State<Arc<AppState>>,
    ExpenseId(id): ExpenseId,
) -> Result<Json<Ack>, ApiError> {
    state.store.delete(id).await?;
    tracing::info!(expense_id = id, "expense deleted");
    Ok(Json(Ack::ok()))
}

/// DELETE /expenses/all - the static route shadows `{id}`, so reject it
/// the same way a non-integer id is rejected
async fn delete_all_segment() -> ApiError {
    ExpenseId::invalid("all")
}

/// DELETE /expenses/by_user/{email} - succeeds even when nothing matches
async fn delete_user_expenses(
    State(state): State<Arc<AppState>>,
    Path(user_email): Path<String>,
) -> Result<Json<Ack>, ApiError> {
    let deleted = state.store.delete_for_user(&user_email).await?;
    tracing::info!(user_email = %user_email, deleted, "user expenses deleted");
    Ok(Json(Ack::ok()))
}

/// PATCH /expenses/{id}/receipt
async fn update_receipt(
    State(state): State<Arc<AppState>>,
    ExpenseId(id): ExpenseId,
    ApiJson(body): ApiJson<ReceiptUpdate>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    let expense = state.store.update_receipt(id, &body.into_url()).await?;
    tracing::debug!(expense_id = id, "receipt url updated");
    Ok(Json(ExpenseResponse::from(expense)))
}

/// Expense routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/all", get(list_all_expenses).delete(delete_all_segment))
        .route("/expenses/by_user/{email}", delete(delete_user_expenses))
        .route("/expenses/{id}", delete(delete_expense))
        .route("/expenses/{id}/receipt", patch(update_receipt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_update_accepts_both_shapes() {
        let bare: ReceiptUpdate = serde_json::from_str(r#""https://r/1""#).unwrap();
        assert_eq!(bare.into_url(), "https://r/1");

        let wrapped: ReceiptUpdate =
            serde_json::from_str(r#"{"receipt_url": "https://r/2"}"#).unwrap();
        assert_eq!(wrapped.into_url(), "https://r/2");
    }

    #[test]
    fn create_request_requires_every_field() {
        let missing_role = r#"{"user_email":"a@x.com","event_name":"Lunch","cost":1,"name":"A"}"#;
        assert!(serde_json::from_str::<CreateExpenseRequest>(missing_role).is_err());
    }
}
