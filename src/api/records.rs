//! Record endpoints shared by `/api/personnel` and `/api/vehicles`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;

use super::{json_body, query_params, ApiResult};
use crate::auth::Session;
use crate::models::Record;
use crate::search::RecordFilter;
use crate::AppState;

/// Confirmation returned by delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/{collection} - List records, optionally filtered by `q` and `status`.
pub async fn list_records<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    filter: Result<Query<RecordFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<R>>> {
    session.require()?;
    let filter = query_params(filter)?;

    let records = state.records::<R>().list(&session).await?;
    Ok(Json(filter.apply(records)))
}

/// GET /api/{collection}/:id - Get a single record.
pub async fn get_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<R>> {
    let record = state.records::<R>().get(&session, &id).await?;
    Ok(Json(record))
}

/// POST /api/{collection} - Create a record.
pub async fn create_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<R>)> {
    session.require()?;
    let input = json_body(payload)?;

    let record = state.records::<R>().create(&session, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/{collection}/:id - Replace the mutable fields of a record.
pub async fn update_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<Json<R>> {
    session.require()?;
    let input = json_body(payload)?;

    let record = state.records::<R>().update(&session, &id, input).await?;
    Ok(Json(record))
}

/// DELETE /api/{collection}/:id - Delete a record.
pub async fn delete_record<R: Record>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.records::<R>().delete(&session, &id).await?;
    Ok(Json(DeleteResponse {
        message: format!("{} deleted successfully", R::LABEL),
    }))
}
