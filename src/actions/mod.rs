//! Form actions.
//!
//! Invoked by form posts rather than REST clients. Every action answers
//! `200 OK` with a `{ success, data | message | error }` envelope.

mod personnel;

pub use personnel::*;

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Uniform action result envelope.
#[derive(Debug, Serialize)]
pub struct ActionResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ActionResult<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Store and server failures collapse into `failure`; caller errors keep their message.
    pub fn from_error(err: AppError, failure: &str) -> Self {
        if err.is_server_side() {
            tracing::error!("{}: {}", failure, err);
            Self::failure(failure)
        } else {
            Self::failure(err.message())
        }
    }

    pub fn from_result(result: Result<T, AppError>, failure: &str) -> Self {
        match result {
            Ok(data) => Self::data(data),
            Err(err) => Self::from_error(err, failure),
        }
    }
}

impl<T: Serialize> IntoResponse for ActionResult<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Turn a form extraction failure into a `BadRequest` error.
pub fn form_body<T>(payload: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    payload
        .map(|Form(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_errors_are_generic() {
        let result: ActionResult<()> = ActionResult::from_result(
            Err(AppError::Database("Database operation failed".to_string())),
            "Failed to create personnel",
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": false, "error": "Failed to create personnel" })
        );
    }

    #[test]
    fn test_caller_errors_keep_their_message() {
        let result: ActionResult<()> = ActionResult::from_result(
            Err(AppError::NotFound("Personnel not found".to_string())),
            "Failed to update personnel",
        );
        assert_eq!(result.error.as_deref(), Some("Personnel not found"));
    }

    #[test]
    fn test_success_envelopes() {
        let value = serde_json::to_value(ActionResult::data(vec![1, 2])).unwrap();
        assert_eq!(value, json!({ "success": true, "data": [1, 2] }));

        let value = serde_json::to_value(ActionResult::<()>::message("done")).unwrap();
        assert_eq!(value, json!({ "success": true, "message": "done" }));
    }
}
