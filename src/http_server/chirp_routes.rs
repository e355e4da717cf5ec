//! Chirp HTTP Routes
//!
//! - `GET  /chirps`     - all chirps, ascending by id
//! - `POST /chirps`     - validate, filter, persist
//! - `GET  /chirps/:id` - one chirp or 404

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::errors::ApiError;
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::storage::{Chirp, ChirpDb};
use crate::validation::ChirpFilter;

// ==================
// Shared State
// ==================

/// State shared by the chirp handlers
pub struct ChirpsState {
    pub db: Arc<ChirpDb>,
    pub metrics: Arc<MetricsRegistry>,
    pub filter: ChirpFilter,
}

impl ChirpsState {
    pub fn new(db: Arc<ChirpDb>, metrics: Arc<MetricsRegistry>, filter: ChirpFilter) -> Self {
        Self {
            db,
            metrics,
            filter,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Create chirp routes
pub fn chirp_routes(state: Arc<ChirpsState>) -> Router {
    Router::new()
        .route("/chirps", get(list_chirps_handler).post(create_chirp_handler))
        .route("/chirps/:id", get(get_chirp_handler))
        .with_state(state)
}

pub(crate) fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

/// Runs a store call on the blocking pool.
///
/// Every store call may wait on the lock a create holds across its fsync,
/// so none of them run on an async worker.
pub(crate) async fn with_db<T, F>(db: &Arc<ChirpDb>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&ChirpDb) -> T + Send + 'static,
    T: Send + 'static,
{
    let db = Arc::clone(db);
    tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))
}

async fn list_chirps_handler(
    State(state): State<Arc<ChirpsState>>,
) -> Result<Json<Vec<Chirp>>, ApiError> {
    let mut chirps = with_db(&state.db, |db| db.get_chirps()).await?;
    chirps.sort_by_key(|c| c.id);
    Ok(Json(chirps))
}

async fn get_chirp_handler(
    State(state): State<Arc<ChirpsState>>,
    Path(id): Path<String>,
) -> Result<Json<Chirp>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(with_db(&state.db, move |db| db.get_chirp(id)).await??))
}

async fn create_chirp_handler(
    State(state): State<Arc<ChirpsState>>,
    payload: Result<Json<CreateChirpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Chirp>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let cleaned = state.filter.validate(&request.body).map_err(|e| {
        state.metrics.increment_chirps_rejected();
        log_event_with_fields(Event::ChirpRejected, &[("reason", e.code())]);
        e
    })?;

    let created = with_db(&state.db, move |db| db.create_chirp(&cleaned)).await?;

    let chirp = created.map_err(|e| {
        state.metrics.increment_store_write_failures();
        e
    })?;
    state.metrics.increment_chirps_created();

    Ok((StatusCode::CREATED, Json(chirp)))
}
