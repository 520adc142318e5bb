//! Clinical record table access.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::NewClinicalRecord;
use crate::entities::ClinicalRecord;
use crate::error::ClinicaResult;

/// Direct CRUD access to the `clinical_records` table.
///
/// The default ordering is newest-first by diagnosis date; filtered lookups
/// keep the same ordering. Referential integrity against patients and tumor
/// types is the store's job: a dangling foreign key surfaces as a constraint
/// violation from the insert or update itself.
#[derive(Clone)]
pub struct ClinicalRecordRepository {
    pool: SqlitePool,
}

impl ClinicalRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a validated clinical record, generating its id and timestamps.
    pub async fn insert(&self, new: NewClinicalRecord) -> ClinicaResult<ClinicalRecord> {
        let now = Utc::now();
        let record = ClinicalRecord {
            id: Uuid::new_v4(),
            patient_id: new.patient_id,
            tumor_type_id: new.tumor_type_id,
            diagnosis_date: new.diagnosis_date,
            stage: new.stage,
            treatment_protocol: new.treatment_protocol,
            notes: new.notes,
            patient: None,
            tumor_type: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO clinical_records \
             (id, patient_id, tumor_type_id, diagnosis_date, stage, treatment_protocol, notes, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(record.patient_id)
        .bind(record.tumor_type_id)
        .bind(record.diagnosis_date)
        .bind(&record.stage)
        .bind(&record.treatment_protocol)
        .bind(&record.notes)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, patient_id = %record.patient_id, "clinical record inserted");
        Ok(record)
    }

    pub async fn find_all(&self) -> ClinicaResult<Vec<ClinicalRecord>> {
        let records = sqlx::query_as::<_, ClinicalRecord>(
            "SELECT * FROM clinical_records ORDER BY diagnosis_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ClinicaResult<Option<ClinicalRecord>> {
        let record =
            sqlx::query_as::<_, ClinicalRecord>("SELECT * FROM clinical_records WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(record)
    }

    pub async fn find_by_patient(&self, patient_id: Uuid) -> ClinicaResult<Vec<ClinicalRecord>> {
        let records = sqlx::query_as::<_, ClinicalRecord>(
            "SELECT * FROM clinical_records WHERE patient_id = ? ORDER BY diagnosis_date DESC",
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn find_by_tumor_type(&self, tumor_type_id: i64) -> ClinicaResult<Vec<ClinicalRecord>> {
        let records = sqlx::query_as::<_, ClinicalRecord>(
            "SELECT * FROM clinical_records WHERE tumor_type_id = ? ORDER BY diagnosis_date DESC",
        )
        .bind(tumor_type_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Persists an already-merged record row, refreshing `updated_at`. The
    /// foreign keys are updatable; the id is not.
    pub async fn update(&self, record: &mut ClinicalRecord) -> ClinicaResult<()> {
        record.updated_at = Utc::now();

        sqlx::query(
            "UPDATE clinical_records \
             SET patient_id = ?, tumor_type_id = ?, diagnosis_date = ?, stage = ?, \
                 treatment_protocol = ?, notes = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(record.patient_id)
        .bind(record.tumor_type_id)
        .bind(record.diagnosis_date)
        .bind(&record.stage)
        .bind(&record.treatment_protocol)
        .bind(&record.notes)
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Physical removal. Returns whether a row existed.
    pub async fn delete(&self, id: Uuid) -> ClinicaResult<bool> {
        let result = sqlx::query("DELETE FROM clinical_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> ClinicaResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clinical_records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
