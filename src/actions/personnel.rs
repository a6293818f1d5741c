//! Personnel form actions.

use axum::{extract::rejection::FormRejection, extract::State, Extension, Form};
use serde::Deserialize;

use super::{form_body, ActionResult};
use crate::auth::Session;
use crate::errors::AppError;
use crate::models::{non_blank, Assignment, Personnel, PersonnelInput, ReturnRequest};
use crate::AppState;

/// Form selecting a record by id.
#[derive(Debug, Deserialize)]
pub struct IdForm {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignForm {
    #[serde(default)]
    pub personnel_id: Option<String>,
    #[serde(default)]
    pub assignment: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnForm {
    #[serde(default)]
    pub personnel_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn required_id(field: &str, value: Option<String>) -> Result<String, AppError> {
    non_blank(value).ok_or_else(|| AppError::missing(field))
}

/// GET /actions/personnel
pub async fn get_personnel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ActionResult<Vec<Personnel>> {
    let result = state.records::<Personnel>().list(&session).await;
    ActionResult::from_result(result, "Failed to fetch personnel")
}

/// POST /actions/personnel/create
pub async fn create_personnel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Form<PersonnelInput>, FormRejection>,
) -> ActionResult<Personnel> {
    let result = async {
        session.require()?;
        let input = form_body(payload)?;
        state.records::<Personnel>().create(&session, input).await
    }
    .await;
    ActionResult::from_result(result, "Failed to create personnel")
}

/// POST /actions/personnel/update
pub async fn update_personnel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Form<PersonnelInput>, FormRejection>,
) -> ActionResult<Personnel> {
    let result = async {
        session.require()?;
        let input = form_body(payload)?;
        let id = required_id("id", input.id.clone())?;
        state.records::<Personnel>().update(&session, &id, input).await
    }
    .await;
    ActionResult::from_result(result, "Failed to update personnel")
}

/// POST /actions/personnel/delete
pub async fn delete_personnel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Form<IdForm>, FormRejection>,
) -> ActionResult<()> {
    let result = async {
        session.require()?;
        let form = form_body(payload)?;
        let id = required_id("id", form.id)?;
        state.records::<Personnel>().delete(&session, &id).await
    }
    .await;

    match result {
        Ok(_) => ActionResult::message("Personnel deleted successfully"),
        Err(err) => ActionResult::from_error(err, "Failed to delete personnel"),
    }
}

/// POST /actions/personnel/assign
pub async fn assign_personnel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Form<AssignForm>, FormRejection>,
) -> ActionResult<Personnel> {
    let result = async {
        session.require()?;
        let form = form_body(payload)?;
        let id = required_id("personnelId", form.personnel_id)?;
        let assignment = Assignment {
            assignment: form.assignment,
            location: form.location,
            notes: form.notes,
        };
        state
            .records::<Personnel>()
            .assign(&session, &id, assignment)
            .await
    }
    .await;
    ActionResult::from_result(result, "Failed to assign personnel")
}

/// POST /actions/personnel/return
pub async fn return_personnel(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Form<ReturnForm>, FormRejection>,
) -> ActionResult<Personnel> {
    let result = async {
        session.require()?;
        let form = form_body(payload)?;
        let id = required_id("personnelId", form.personnel_id)?;
        let request = ReturnRequest {
            status: form.status,
            unit: form.unit,
            notes: form.notes,
        };
        state
            .records::<Personnel>()
            .return_from_assignment(&session, &id, request)
            .await
    }
    .await;
    ActionResult::from_result(result, "Failed to return personnel")
}
