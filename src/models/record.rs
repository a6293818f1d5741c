//! The record contract shared by every entity collection.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

/// A document stored in its own entity collection, keyed by a business-assigned id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Raw input accepted by create and update.
    type Input: RecordInput<Fields = Self::Fields>;
    /// Validated mutable fields (everything except `id` and `lastUpdated`).
    type Fields: Send;

    /// Table backing the collection, also the REST path segment.
    const COLLECTION: &'static str;
    /// Prefix of activity kinds, e.g. `personnel-create`.
    const KIND: &'static str;
    /// Human label used in messages.
    const LABEL: &'static str;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn status_label(&self) -> &'static str;
    fn last_updated(&self) -> DateTime<Utc>;

    /// Text the list view searches: id, name, rank or type, unit or location, specialization.
    fn search_fields(&self) -> Vec<&str>;

    fn from_fields(id: String, fields: Self::Fields, now: DateTime<Utc>) -> Self;
    fn apply(&mut self, fields: Self::Fields, now: DateTime<Utc>);

    /// `Name (ID)` label recorded in activity events.
    fn item_label(&self) -> String {
        format!("{} ({})", self.name(), self.id())
    }
}

/// Unvalidated create/update payload for a record type.
pub trait RecordInput: DeserializeOwned + Send + 'static {
    type Fields;

    /// Validate a create payload, returning the new id and its fields.
    fn into_create(self) -> Result<(String, Self::Fields), AppError>;

    /// Validate an update payload for the record at `id`.
    fn into_update(self, id: &str) -> Result<Self::Fields, AppError>;
}
