//! Store revision endpoint.

use axum::{extract::State, Extension, Json};

use super::ApiResult;
use crate::auth::Session;
use crate::models::RevisionInfo;
use crate::AppState;

/// GET /api/revision - Current revision; changes after every successful mutation.
pub async fn get_revision(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<RevisionInfo>> {
    session.require()?;

    let revision_info = state.repo.get_revision_info().await?;
    Ok(Json(revision_info))
}
