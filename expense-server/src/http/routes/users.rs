//! Users derived from expense rows

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::UserSummary;

/// GET /users_from_expenses - distinct (email, name, role) triples
async fn users_from_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.store.distinct_users().await?;
    Ok(Json(users))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users_from_expenses", get(users_from_expenses))
}
