//! Personnel model and its inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, Record, RecordInput, Validator};
use crate::errors::AppError;

string_enum! {
    /// Military rank, lowest first.
    pub enum Rank {
        Private => "Private",
        Corporal => "Corporal",
        Sergeant => "Sergeant",
        Lieutenant => "Lieutenant",
        Captain => "Captain",
        Major => "Major",
        Colonel => "Colonel",
    }
}

string_enum! {
    pub enum PersonnelStatus {
        Active => "Active",
        Deployed => "Deployed",
        OnLeave => "On Leave",
        Medical => "Medical",
        Inactive => "Inactive",
    }
}

impl Default for PersonnelStatus {
    fn default() -> Self {
        PersonnelStatus::Active
    }
}

/// A personnel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
    pub id: String,
    pub name: String,
    pub rank: Rank,
    pub unit: String,
    pub status: PersonnelStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Validated mutable personnel fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonnelFields {
    pub name: String,
    pub rank: Rank,
    pub unit: String,
    pub status: PersonnelStatus,
    pub specialization: Option<String>,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
}

/// Request body (JSON or form) for creating or updating personnel.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PersonnelInput {
    fn fields(self, v: &mut Validator) -> Option<PersonnelFields> {
        let name = v.required("name", self.name);
        let rank = v.required_enum("rank", self.rank);
        let unit = v.required("unit", self.unit);
        let status = v.required_enum("status", self.status);

        match (name, rank, unit, status) {
            (Some(name), Some(rank), Some(unit), Some(status)) => Some(PersonnelFields {
                name,
                rank,
                unit,
                status,
                specialization: non_blank(self.specialization),
                contact_info: non_blank(self.contact_info),
                notes: non_blank(self.notes),
            }),
            _ => None,
        }
    }
}

impl RecordInput for PersonnelInput {
    type Fields = PersonnelFields;

    fn into_create(mut self) -> Result<(String, PersonnelFields), AppError> {
        let mut v = Validator::default();
        let id = v.required("id", self.id.take());
        let fields = self.fields(&mut v);

        match (id, fields) {
            (Some(id), Some(fields)) if v.is_ok() => Ok((id, fields)),
            _ => Err(v.into_error()),
        }
    }

    fn into_update(mut self, id: &str) -> Result<PersonnelFields, AppError> {
        let mut v = Validator::default();
        if let Some(body_id) = non_blank(self.id.take()) {
            if body_id != id {
                v.invalid("id");
            }
        }
        let fields = self.fields(&mut v);

        match fields {
            Some(fields) if v.is_ok() => Ok(fields),
            _ => Err(v.into_error()),
        }
    }
}

/// Deployment of a person to an assignment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unit the person is deployed with
    #[serde(default)]
    pub assignment: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Return of a person from an assignment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for Personnel {
    type Input = PersonnelInput;
    type Fields = PersonnelFields;

    const COLLECTION: &'static str = "personnel";
    const KIND: &'static str = "personnel";
    const LABEL: &'static str = "Personnel";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.id.as_str(),
            self.name.as_str(),
            self.rank.as_str(),
            self.unit.as_str(),
        ];
        if let Some(specialization) = &self.specialization {
            fields.push(specialization);
        }
        fields
    }

    fn from_fields(id: String, fields: PersonnelFields, now: DateTime<Utc>) -> Self {
        Personnel {
            id,
            name: fields.name,
            rank: fields.rank,
            unit: fields.unit,
            status: fields.status,
            specialization: fields.specialization,
            contact_info: fields.contact_info,
            notes: fields.notes,
            last_updated: now,
        }
    }

    fn apply(&mut self, fields: PersonnelFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.rank = fields.rank;
        self.unit = fields.unit;
        self.status = fields.status;
        self.specialization = fields.specialization;
        self.contact_info = fields.contact_info;
        self.notes = fields.notes;
        self.last_updated = now;
    }
}
