//! Database repository for document and activity operations.
//!
//! Every mutation commits together with its activity event and a revision bump.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::errors::AppError;
use crate::models::{Activity, NewActivity, Record, RevisionInfo};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.try_get("revision_id")?,
            generated_at: row.try_get("generated_at")?,
        })
    }

    // ==================== DOCUMENT OPERATIONS ====================

    /// List every document of a collection, most recently updated first.
    pub async fn list_documents<R: Record>(&self) -> Result<Vec<R>, AppError> {
        let sql = format!(
            "SELECT document FROM {} ORDER BY last_updated DESC",
            R::COLLECTION
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(document_from_row::<R>).collect()
    }

    /// Get a document by its id.
    pub async fn find_document<R: Record>(&self, id: &str) -> Result<Option<R>, AppError> {
        let sql = format!("SELECT document FROM {} WHERE id = ?", R::COLLECTION);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(document_from_row::<R>).transpose()
    }

    /// Insert a document unless its id is already taken.
    pub async fn insert_document<R: Record>(
        &self,
        record: &R,
        activity: &NewActivity,
    ) -> Result<(), AppError> {
        let document = document_to_string(record)?;
        let sql = format!(
            "INSERT OR IGNORE INTO {} (id, document, last_updated) VALUES (?, ?, ?)",
            R::COLLECTION
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&sql)
            .bind(record.id())
            .bind(&document)
            .bind(encode_timestamp(record.last_updated()))
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "{} with this ID already exists",
                R::LABEL
            )));
        }

        append_activity(&mut tx, activity).await?;
        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Overwrite the stored document with the same id.
    pub async fn replace_document<R: Record>(
        &self,
        record: &R,
        activity: &NewActivity,
    ) -> Result<(), AppError> {
        let document = document_to_string(record)?;
        let sql = format!(
            "UPDATE {} SET document = ?, last_updated = ? WHERE id = ?",
            R::COLLECTION
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&sql)
            .bind(&document)
            .bind(encode_timestamp(record.last_updated()))
            .bind(record.id())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<R>());
        }

        append_activity(&mut tx, activity).await?;
        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Delete the document with the given id.
    pub async fn delete_document<R: Record>(
        &self,
        id: &str,
        activity: &NewActivity,
    ) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::COLLECTION);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

        if result.rows_affected() == 0 {
            return Err(not_found::<R>());
        }

        append_activity(&mut tx, activity).await?;
        bump_revision(&mut tx).await?;
        tx.commit().await?;

        Ok(())
    }

    // ==================== ACTIVITY OPERATIONS ====================

    /// List the most recent activity events, newest first.
    pub async fn list_activities(&self, limit: i64) -> Result<Vec<Activity>, AppError> {
        let rows = sqlx::query(
            "SELECT id, type, user, user_initials, item, notes, created_at FROM activities ORDER BY created_at DESC, rowid DESC LIMIT ?"
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(activity_from_row).collect()
    }
}

/// Not-found error naming the record type.
pub fn not_found<R: Record>() -> AppError {
    AppError::NotFound(format!("{} not found", R::LABEL))
}

/// Fixed-width UTC timestamp so text order matches time order.
pub fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(format!("Invalid stored timestamp {:?}: {}", value, e)))
}

async fn append_activity(
    tx: &mut Transaction<'_, Sqlite>,
    activity: &NewActivity,
) -> Result<(), AppError> {
    let id = uuid::Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO activities (id, type, user, user_initials, item, notes, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&id)
    .bind(&activity.kind)
    .bind(&activity.user)
    .bind(&activity.user_initials)
    .bind(&activity.item)
    .bind(&activity.notes)
    .bind(encode_timestamp(activity.created_at))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn bump_revision(tx: &mut Transaction<'_, Sqlite>) -> Result<(), AppError> {
    let now = encode_timestamp(Utc::now());
    sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

// Helper functions for row conversion

fn document_to_string<R: Record>(record: &R) -> Result<String, AppError> {
    serde_json::to_string(record).map_err(|e| {
        tracing::error!("Failed to encode {} document: {:?}", R::KIND, e);
        AppError::Internal(format!("Failed to encode {} document", R::KIND))
    })
}

fn document_from_row<R: Record>(row: &sqlx::sqlite::SqliteRow) -> Result<R, AppError> {
    let document: String = row.try_get("document")?;
    serde_json::from_str(&document).map_err(|e| {
        tracing::error!("Corrupt {} document: {:?}", R::KIND, e);
        AppError::Internal(format!("Corrupt {} document", R::KIND))
    })
}

fn activity_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Activity, AppError> {
    let created_at: String = row.try_get("created_at")?;
    Ok(Activity {
        id: row.try_get("id")?,
        kind: row.try_get("type")?,
        user: row.try_get("user")?,
        user_initials: row.try_get("user_initials")?,
        item: row.try_get("item")?,
        notes: row.try_get("notes")?,
        created_at: decode_timestamp(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_encoding_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1);

        let encoded_a = encode_timestamp(a);
        let encoded_b = encode_timestamp(b);
        assert_eq!(encoded_a, "2024-03-01T12:00:00.000000Z");
        assert_eq!(encoded_a.len(), encoded_b.len());
        assert!(encoded_b > encoded_a);
        assert_eq!(decode_timestamp(&encoded_b).unwrap(), b);
    }
}
