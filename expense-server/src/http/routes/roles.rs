//! Role event endpoints
//!
//! Both endpoints write a zero-cost row into the expenses table and
//! answer with `{"ok": true, "id": N}`.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::Ack;
use crate::http::error::ApiError;
use crate::http::extractors::ApiJson;
use crate::http::server::AppState;
use crate::models::validation::{loose_text, non_empty};
use crate::models::{NewExpense, RoleEvent, ValidationError};

/// POST /role_change body. Falsy values count as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoleChangeRequest {
    #[serde(deserialize_with = "loose_text")]
    pub user_email: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub role: Option<String>,
}

impl RoleChangeRequest {
    pub fn into_expense(self) -> Result<NewExpense, ValidationError> {
        match (non_empty(self.user_email), non_empty(self.role)) {
            (Some(user_email), Some(role)) => {
                Ok(RoleEvent::RoleChange { role }.to_expense(user_email, non_empty(self.name)))
            }
            _ => Err(ValidationError::Missing {
                required: &["user_email", "role"],
            }),
        }
    }
}

/// POST /become_handler body. Falsy values count as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BecomeHandlerRequest {
    #[serde(deserialize_with = "loose_text")]
    pub user_email: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub secret_code: Option<String>,
}

/// POST /role_change - record a role change for a user
async fn role_change(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<RoleChangeRequest>,
) -> Result<Json<Ack>, ApiError> {
    let row = req.into_expense()?;
    let expense = state.store.create(row).await?;
    tracing::info!(
        expense_id = expense.id,
        user_email = %expense.user_email,
        role = expense.role.as_deref().unwrap_or_default(),
        "role change recorded"
    );
    Ok(Json(Ack::created(expense.id)))
}

/// POST /become_handler - grant the handler role to holders of the secret
async fn become_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<BecomeHandlerRequest>,
) -> Result<Json<Ack>, ApiError> {
    let (user_email, secret_code) = match (non_empty(req.user_email), non_empty(req.secret_code)) {
        (Some(user_email), Some(secret_code)) => (user_email, secret_code),
        _ => {
            return Err(ValidationError::Missing {
                required: &["user_email", "secret_code"],
            }
            .into())
        }
    };

    if !state.handler_secret.verify(&secret_code) {
        tracing::warn!(user_email = %user_email, "handler grant refused: bad secret code");
        return Err(ApiError::Forbidden {
            reason: "Invalid secret code".into(),
        });
    }

    let row = RoleEvent::BecomeHandler.to_expense(user_email, non_empty(req.name));
    let expense = state.store.create(row).await?;
    tracing::info!(expense_id = expense.id, user_email = %expense.user_email, "handler granted");
    Ok(Json(Ack::created(expense.id)))
}

/// Role routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/role_change", post(role_change))
        .route("/become_handler", post(become_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ROLE_CHANGE_EVENT;

    #[test]
    fn role_change_requires_email_and_role() {
        let req = RoleChangeRequest {
            user_email: Some("a@x.com".into()),
            name: None,
            role: Some(String::new()),
        };
        let err = req.into_expense().unwrap_err();
        assert_eq!(err.to_string(), "user_email and role required");
    }

    #[test]
    fn role_change_name_defaults_to_email() {
        let req = RoleChangeRequest {
            user_email: Some("a@x.com".into()),
            name: Some(String::new()),
            role: Some("admin".into()),
        };
        let row = req.into_expense().unwrap();
        assert_eq!(row.event_name, ROLE_CHANGE_EVENT);
        assert_eq!(row.name.as_deref(), Some("a@x.com"));
    }
}
