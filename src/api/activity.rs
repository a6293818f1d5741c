//! Activity log endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{query_params, ApiResult};
use crate::auth::Session;
use crate::models::Activity;
use crate::AppState;

/// Maximum number of activity events returned at once.
const MAX_ACTIVITY_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum number of events (default: 20).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /api/activity - Most recent activity events first.
pub async fn list_activity(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    params: Result<Query<ActivityQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Activity>>> {
    session.require()?;
    let params = query_params(params)?;

    let limit = params.limit.clamp(1, MAX_ACTIVITY_LIMIT);
    let activities = state.repo.list_activities(limit).await?;
    Ok(Json(activities))
}
