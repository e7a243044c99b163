//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. The cache does
//! blocking file I/O, so every operation runs on the blocking thread pool.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteMultipleRequest, GetMultipleRequest, GetMultipleResponse, GetResponse, HasResponse,
    HealthResponse, SetMultipleRequest, SetRequest, StatsResponse, SuccessResponse,
};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Fault-containing cache facade
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Cache::from_config(config)?))
    }
}

/// Runs a cache operation on the blocking pool.
async fn run_blocking<T, F>(state: AppState, op: F) -> Result<T>
where
    F: FnOnce(&Cache) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&state.cache))
        .await
        .map_err(|e| CacheError::Internal(e.to_string()))
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SuccessResponse>> {
    let success = run_blocking(state, move |cache| cache.set(&req.key, &req.value, req.ttl)).await?;
    Ok(Json(SuccessResponse::new(success)))
}

/// Handler for GET /get/:key
///
/// Absent, expired, and unreadable entries all yield a null value.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let lookup = key.clone();
    let value = run_blocking(state, move |cache| cache.get(&lookup, Value::Null)).await?;
    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let success = run_blocking(state, move |cache| cache.delete(&key)).await?;
    Ok(Json(SuccessResponse::new(success)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let lookup = key.clone();
    let exists = run_blocking(state, move |cache| cache.has(&lookup)).await?;
    Ok(Json(HasResponse::new(key, exists)))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<SuccessResponse>> {
    let success = run_blocking(state, |cache| cache.clear()).await?;
    Ok(Json(SuccessResponse::new(success)))
}

/// Handler for POST /get-multiple
pub async fn get_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<GetMultipleRequest>,
) -> Result<Json<GetMultipleResponse>> {
    let values = run_blocking(state, move |cache| cache.get_multiple(&req.keys, req.default)).await?;
    Ok(Json(GetMultipleResponse { values }))
}

/// Handler for PUT /set-multiple
pub async fn set_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<SetMultipleRequest>,
) -> Result<Json<SuccessResponse>> {
    let success = run_blocking(state, move |cache| cache.set_multiple(req.entries, req.ttl)).await?;
    Ok(Json(SuccessResponse::new(success)))
}

/// Handler for POST /delete-multiple
pub async fn delete_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<DeleteMultipleRequest>,
) -> Result<Json<SuccessResponse>> {
    let success = run_blocking(state, move |cache| cache.delete_multiple(&req.keys)).await?;
    Ok(Json(SuccessResponse::new(success)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
