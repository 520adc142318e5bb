//! Patient table access.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::NewPatient;
use crate::entities::Patient;
use crate::error::ClinicaResult;

/// Direct CRUD access to the `patients` table.
///
/// The default ordering is newest-first by creation time; filtered lookups
/// keep the same ordering.
#[derive(Clone)]
pub struct PatientRepository {
    pool: SqlitePool,
}

impl PatientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a validated patient, generating its id and timestamps.
    pub async fn insert(&self, new: NewPatient) -> ClinicaResult<Patient> {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            first_name: new.first_name,
            last_name: new.last_name,
            birth_date: new.birth_date,
            gender: new.gender,
            status: new.status,
            clinical_records: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO patients \
             (id, first_name, last_name, birth_date, gender, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(patient.id)
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.birth_date)
        .bind(patient.gender)
        .bind(patient.status)
        .bind(patient.created_at)
        .bind(patient.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %patient.id, "patient inserted");
        Ok(patient)
    }

    pub async fn find_all(&self) -> ClinicaResult<Vec<Patient>> {
        let patients =
            sqlx::query_as::<_, Patient>("SELECT * FROM patients ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(patients)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ClinicaResult<Option<Patient>> {
        let patient = sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    /// Exact-match filter on the status column. Unknown values simply match
    /// nothing.
    pub async fn find_by_status(&self, status: &str) -> ClinicaResult<Vec<Patient>> {
        let patients = sqlx::query_as::<_, Patient>(
            "SELECT * FROM patients WHERE status = ? ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(patients)
    }

    /// Persists an already-merged patient row, refreshing `updated_at`.
    pub async fn update(&self, patient: &mut Patient) -> ClinicaResult<()> {
        patient.updated_at = Utc::now();

        sqlx::query(
            "UPDATE patients \
             SET first_name = ?, last_name = ?, birth_date = ?, gender = ?, status = ?, \
                 updated_at = ? \
             WHERE id = ?",
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.birth_date)
        .bind(patient.gender)
        .bind(patient.status)
        .bind(patient.updated_at)
        .bind(patient.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Physical removal. Returns whether a row existed.
    pub async fn delete(&self, id: Uuid) -> ClinicaResult<bool> {
        let result = sqlx::query("DELETE FROM patients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> ClinicaResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM patients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
