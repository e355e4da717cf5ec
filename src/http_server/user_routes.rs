//! User HTTP Routes
//!
//! Users have their own id space, separate from chirps.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::chirp_routes::{parse_id, with_db};
use super::errors::ApiError;
use crate::observability::MetricsRegistry;
use crate::storage::{ChirpDb, User};
use crate::validation::validate_email;

pub struct UsersState {
    pub db: Arc<ChirpDb>,
    pub metrics: Arc<MetricsRegistry>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

/// Create user routes
pub fn user_routes(state: Arc<UsersState>) -> Router {
    Router::new()
        .route("/users", post(create_user_handler))
        .route("/users/:id", get(get_user_handler))
        .with_state(state)
}

async fn create_user_handler(
    State(state): State<Arc<UsersState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let email = validate_email(&request.email)?;

    let user = with_db(&state.db, move |db| db.create_user(&email))
        .await?
        .map_err(|e| {
            state.metrics.increment_store_write_failures();
            e
        })?;
    state.metrics.increment_users_created();

    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user_handler(
    State(state): State<Arc<UsersState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(with_db(&state.db, move |db| db.get_user(id)).await??))
}
