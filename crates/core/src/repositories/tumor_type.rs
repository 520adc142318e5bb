//! Tumor type table access.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::dto::NewTumorType;
use crate::entities::TumorType;
use crate::error::ClinicaResult;

/// Direct CRUD access to the `tumor_types` table.
///
/// Tumor types are reference data; the default ordering is alphabetical by
/// name.
#[derive(Clone)]
pub struct TumorTypeRepository {
    pool: SqlitePool,
}

impl TumorTypeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a validated tumor type; the store assigns the integer id.
    pub async fn insert(&self, new: NewTumorType) -> ClinicaResult<TumorType> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO tumor_types (name, system_affected, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.system_affected)
        .bind(&new.description)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let tumor_type = TumorType {
            id: result.last_insert_rowid(),
            name: new.name,
            system_affected: new.system_affected,
            description: new.description,
            clinical_records: None,
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(id = tumor_type.id, "tumor type inserted");
        Ok(tumor_type)
    }

    pub async fn find_all(&self) -> ClinicaResult<Vec<TumorType>> {
        let tumor_types =
            sqlx::query_as::<_, TumorType>("SELECT * FROM tumor_types ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(tumor_types)
    }

    pub async fn find_by_id(&self, id: i64) -> ClinicaResult<Option<TumorType>> {
        let tumor_type = sqlx::query_as::<_, TumorType>("SELECT * FROM tumor_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tumor_type)
    }

    /// Exact-match filter on the affected system, alphabetical like
    /// `find_all`.
    pub async fn find_by_system(&self, system_affected: &str) -> ClinicaResult<Vec<TumorType>> {
        let tumor_types = sqlx::query_as::<_, TumorType>(
            "SELECT * FROM tumor_types WHERE system_affected = ? ORDER BY name ASC",
        )
        .bind(system_affected)
        .fetch_all(&self.pool)
        .await?;
        Ok(tumor_types)
    }

    /// Persists an already-merged tumor type row, refreshing `updated_at`.
    pub async fn update(&self, tumor_type: &mut TumorType) -> ClinicaResult<()> {
        tumor_type.updated_at = Utc::now();

        sqlx::query(
            "UPDATE tumor_types \
             SET name = ?, system_affected = ?, description = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&tumor_type.name)
        .bind(&tumor_type.system_affected)
        .bind(&tumor_type.description)
        .bind(tumor_type.updated_at)
        .bind(tumor_type.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Physical removal. Returns whether a row existed.
    pub async fn delete(&self, id: i64) -> ClinicaResult<bool> {
        let result = sqlx::query("DELETE FROM tumor_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> ClinicaResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tumor_types")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
