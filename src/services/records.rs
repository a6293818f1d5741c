//! Record lifecycle shared by every entity collection.
//!
//! Each operation checks the session before touching the store. Mutations are
//! written together with exactly one activity event; a failed write leaves
//! neither behind.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};

use super::Clock;
use crate::auth::{Principal, Session};
use crate::db::{not_found, Repository};
use crate::errors::AppError;
use crate::models::{Mutation, NewActivity, Record, RecordInput};

/// Create/read/update/delete for one record type.
pub struct RecordService<'a, R> {
    repo: &'a Repository,
    clock: &'a Clock,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record> RecordService<'a, R> {
    pub fn new(repo: &'a Repository, clock: &'a Clock) -> Self {
        Self {
            repo,
            clock,
            _record: PhantomData,
        }
    }

    /// All records, most recently updated first.
    pub async fn list(&self, session: &Session) -> Result<Vec<R>, AppError> {
        session.require()?;
        self.repo.list_documents::<R>().await
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<R, AppError> {
        session.require()?;
        self.find_existing(id).await
    }

    pub async fn create(&self, session: &Session, input: R::Input) -> Result<R, AppError> {
        let principal = session.require()?;
        let (id, fields) = input.into_create()?;

        let now = self.clock.now();
        let record = R::from_fields(id, fields, now);
        let activity = new_activity(
            principal,
            Mutation::Create.kind(R::KIND),
            record.item_label(),
            format!("Created new {} record", R::KIND),
            now,
        );

        self.repo.insert_document(&record, &activity).await?;
        self.log_mutation(Mutation::Create, record.id(), principal);

        Ok(record)
    }

    /// Overwrite every mutable field with the given input.
    pub async fn update(&self, session: &Session, id: &str, input: R::Input) -> Result<R, AppError> {
        let principal = session.require()?;
        let fields = input.into_update(id)?;

        self.modify(
            principal,
            id,
            Mutation::Update,
            format!("Updated {} record", R::KIND),
            move |record, now| record.apply(fields, now),
        )
        .await
    }

    /// Delete a record, returning it as it was before deletion.
    pub async fn delete(&self, session: &Session, id: &str) -> Result<R, AppError> {
        let principal = session.require()?;
        let record = self.find_existing(id).await?;

        let now = self.clock.now();
        let activity = new_activity(
            principal,
            Mutation::Delete.kind(R::KIND),
            record.item_label(),
            format!("Deleted {} record", R::KIND),
            now,
        );

        self.repo.delete_document::<R>(id, &activity).await?;
        self.log_mutation(Mutation::Delete, id, principal);

        Ok(record)
    }

    /// Load, change and store an existing record under one activity event.
    pub(crate) async fn modify<F>(
        &self,
        principal: &Principal,
        id: &str,
        mutation: Mutation,
        notes: String,
        change: F,
    ) -> Result<R, AppError>
    where
        F: FnOnce(&mut R, DateTime<Utc>) + Send,
    {
        let mut record = self.find_existing(id).await?;

        let now = self.clock.now();
        change(&mut record, now);
        let activity = new_activity(
            principal,
            mutation.kind(R::KIND),
            record.item_label(),
            notes,
            now,
        );

        self.repo.replace_document(&record, &activity).await?;
        self.log_mutation(mutation, id, principal);

        Ok(record)
    }

    async fn find_existing(&self, id: &str) -> Result<R, AppError> {
        self.repo
            .find_document::<R>(id)
            .await?
            .ok_or_else(not_found::<R>)
    }

    fn log_mutation(&self, mutation: Mutation, id: &str, principal: &Principal) {
        tracing::info!(
            "{} by {}: {}",
            mutation.kind(R::KIND),
            principal.name,
            id
        );

        let paths = [
            "/".to_string(),
            format!("/{}", R::COLLECTION),
            format!("/{}/{}", R::COLLECTION, id),
        ];
        tracing::debug!("Revalidating views: {:?}", paths);
    }
}

fn new_activity(
    principal: &Principal,
    kind: String,
    item: String,
    notes: String,
    created_at: DateTime<Utc>,
) -> NewActivity {
    NewActivity {
        kind,
        user: principal.name.clone(),
        user_initials: principal.initials.clone(),
        item,
        notes,
        created_at,
    }
}
