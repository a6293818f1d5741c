//! Vehicle model and its input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, Record, RecordInput, Validator};
use crate::errors::AppError;

string_enum! {
    pub enum VehicleType {
        Transport => "Transport",
        Armored => "Armored",
        Utility => "Utility",
        Cargo => "Cargo",
        Tactical => "Tactical",
    }
}

string_enum! {
    pub enum VehicleStatus {
        Available => "Available",
        Deployed => "Deployed",
        Maintenance => "Maintenance",
    }
}

string_enum! {
    pub enum Location {
        MotorPoolA => "Motor Pool A",
        MotorPoolB => "Motor Pool B",
        FieldUnit1 => "Field Unit 1",
        FieldUnit2 => "Field Unit 2",
        Workshop => "Workshop",
    }
}

string_enum! {
    pub enum Condition {
        Excellent => "Excellent",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
}

string_enum! {
    pub enum FuelLevel {
        Full => "Full",
        ThreeQuarters => "3/4",
        Half => "1/2",
        Quarter => "1/4",
        Empty => "Empty",
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Available
    }
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Excellent
    }
}

impl Default for FuelLevel {
    fn default() -> Self {
        FuelLevel::Full
    }
}

/// A vehicle record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub location: Location,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub fuel_level: FuelLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Validated mutable vehicle fields.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFields {
    pub name: String,
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub location: Location,
    pub condition: Condition,
    pub fuel_level: FuelLevel,
    pub notes: Option<String>,
}

/// Request body for creating or updating a vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub fuel_level: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl VehicleInput {
    fn fields(self, v: &mut Validator) -> Option<VehicleFields> {
        let name = v.required("name", self.name);
        let vehicle_type = v.required_enum("type", self.vehicle_type);
        let status = v.required_enum("status", self.status);
        let location = v.required_enum("location", self.location);
        let condition = v.defaulted_enum("condition", self.condition);
        let fuel_level = v.defaulted_enum("fuelLevel", self.fuel_level);

        match (name, vehicle_type, status, location) {
            (Some(name), Some(vehicle_type), Some(status), Some(location)) => Some(VehicleFields {
                name,
                vehicle_type,
                status,
                location,
                condition,
                fuel_level,
                notes: non_blank(self.notes),
            }),
            _ => None,
        }
    }
}

impl RecordInput for VehicleInput {
    type Fields = VehicleFields;

    fn into_create(mut self) -> Result<(String, VehicleFields), AppError> {
        let mut v = Validator::default();
        let id = v.required("id", self.id.take());
        let fields = self.fields(&mut v);

        match (id, fields) {
            (Some(id), Some(fields)) if v.is_ok() => Ok((id, fields)),
            _ => Err(v.into_error()),
        }
    }

    fn into_update(mut self, id: &str) -> Result<VehicleFields, AppError> {
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

impl Record for Vehicle {
    type Input = VehicleInput;
    type Fields = VehicleFields;

    const COLLECTION: &'static str = "vehicles";
    const KIND: &'static str = "vehicle";
    const LABEL: &'static str = "Vehicle";

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
        vec![
            self.id.as_str(),
            self.name.as_str(),
            self.vehicle_type.as_str(),
            self.location.as_str(),
        ]
    }

    fn from_fields(id: String, fields: VehicleFields, now: DateTime<Utc>) -> Self {
        Vehicle {
            id,
            name: fields.name,
            vehicle_type: fields.vehicle_type,
            status: fields.status,
            location: fields.location,
            condition: fields.condition,
            fuel_level: fields.fuel_level,
            notes: fields.notes,
            last_updated: now,
        }
    }

    fn apply(&mut self, fields: VehicleFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.vehicle_type = fields.vehicle_type;
        self.status = fields.status;
        self.location = fields.location;
        self.condition = fields.condition;
        self.fuel_level = fields.fuel_level;
        self.notes = fields.notes;
        self.last_updated = now;
    }
}
