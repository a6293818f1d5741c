//! REST API module.
//!
//! Record endpoints are generic over the record type and mounted once per collection.

mod activity;
mod records;
mod revision;

pub use activity::*;
pub use records::*;
pub use revision::*;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::errors::AppError;

/// Handler result: the response body on success, an error envelope otherwise.
pub type ApiResult<T> = Result<T, AppError>;

/// Turn a JSON extraction failure into the standard error envelope.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Turn a query string extraction failure into the standard error envelope.
pub fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
