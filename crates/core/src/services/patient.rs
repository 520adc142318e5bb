//! Patient operations.

use uuid::Uuid;

use crate::dto::{CreatePatientDto, UpdatePatientDto};
use crate::entities::{Patient, PatientStatus};
use crate::error::{ClinicaError, ClinicaResult, EntityKind};
use crate::repositories::{ClinicalRecordRepository, PatientRepository, TumorTypeRepository};

/// Orchestrates patient CRUD over the repositories.
///
/// Listings eagerly attach each patient's clinical records; a single-record
/// read additionally resolves each record's tumor type, so one read returns
/// the fully hydrated object graph.
#[derive(Clone)]
pub struct PatientService {
    patients: PatientRepository,
    records: ClinicalRecordRepository,
    tumor_types: TumorTypeRepository,
}

impl PatientService {
    /// Builds the service from its injected repositories.
    pub fn new(
        patients: PatientRepository,
        records: ClinicalRecordRepository,
        tumor_types: TumorTypeRepository,
    ) -> Self {
        Self {
            patients,
            records,
            tumor_types,
        }
    }

    /// Validates and persists a new patient. `status` defaults to `Activo`.
    pub async fn create(&self, dto: CreatePatientDto) -> ClinicaResult<Patient> {
        let new = dto.validate()?;
        self.patients.insert(new).await
    }

    /// All patients, newest-first, each with its clinical records attached.
    pub async fn find_all(&self) -> ClinicaResult<Vec<Patient>> {
        let patients = self.patients.find_all().await?;
        self.attach_records(patients).await
    }

    /// Patients with the given status, newest-first, with records attached.
    pub async fn find_by_status(&self, status: &str) -> ClinicaResult<Vec<Patient>> {
        let patients = self.patients.find_by_status(status).await?;
        self.attach_records(patients).await
    }

    /// One patient with records and, transitively, each record's tumor type.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve.
    pub async fn find_one(&self, id: Uuid) -> ClinicaResult<Patient> {
        let mut patient = self.require(id).await?;

        let mut records = self.records.find_by_patient(id).await?;
        for record in &mut records {
            record.tumor_type = self.tumor_types.find_by_id(record.tumor_type_id).await?;
        }
        patient.clinical_records = Some(records);

        Ok(patient)
    }

    /// Strict-merge partial update: fields absent from the payload keep
    /// their current values.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a present field violates its rule; `NotFound`
    /// when the id does not resolve.
    pub async fn update(&self, id: Uuid, dto: UpdatePatientDto) -> ClinicaResult<Patient> {
        let patch = dto.validate()?;
        let mut patient = self.require(id).await?;

        if let Some(first_name) = patch.first_name {
            patient.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            patient.last_name = last_name;
        }
        if let Some(birth_date) = patch.birth_date {
            patient.birth_date = birth_date;
        }
        if let Some(gender) = patch.gender {
            patient.gender = gender;
        }
        if let Some(status) = patch.status {
            patient.status = status;
        }

        self.patients.update(&mut patient).await?;
        Ok(patient)
    }

    /// Forces `status = Inactivo`, ignoring every other field. The rest of
    /// the record is untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve.
    pub async fn deactivate(&self, id: Uuid) -> ClinicaResult<Patient> {
        let mut patient = self.require(id).await?;
        patient.status = PatientStatus::Inactivo;
        self.patients.update(&mut patient).await?;

        tracing::info!(id = %id, "patient deactivated");
        Ok(patient)
    }

    /// Physical removal; the store cascades to the patient's records.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve.
    pub async fn remove(&self, id: Uuid) -> ClinicaResult<()> {
        if !self.patients.delete(id).await? {
            return Err(ClinicaError::not_found(EntityKind::Patient, id));
        }
        Ok(())
    }

    async fn require(&self, id: Uuid) -> ClinicaResult<Patient> {
        self.patients
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinicaError::not_found(EntityKind::Patient, id))
    }

    async fn attach_records(&self, mut patients: Vec<Patient>) -> ClinicaResult<Vec<Patient>> {
        for patient in &mut patients {
            patient.clinical_records = Some(self.records.find_by_patient(patient.id).await?);
        }
        Ok(patients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::dto::{CreateClinicalRecordDto, CreateTumorTypeDto};
    use crate::entities::Gender;
    use crate::services::{ClinicalRecordService, TumorTypeService};
    use chrono::NaiveDate;
    use sqlx::SqlitePool;

    fn services(pool: &SqlitePool) -> (PatientService, TumorTypeService, ClinicalRecordService) {
        let patients = PatientRepository::new(pool.clone());
        let tumor_types = TumorTypeRepository::new(pool.clone());
        let records = ClinicalRecordRepository::new(pool.clone());
        (
            PatientService::new(patients.clone(), records.clone(), tumor_types.clone()),
            TumorTypeService::new(tumor_types.clone(), records.clone(), patients.clone()),
            ClinicalRecordService::new(records, patients, tumor_types),
        )
    }

    fn create_dto() -> CreatePatientDto {
        CreatePatientDto {
            first_name: "Juan".into(),
            last_name: "Pérez".into(),
            birth_date: "1980-05-15".into(),
            gender: "Masculino".into(),
            status: None,
        }
    }

    #[tokio::test]
    async fn find_one_on_missing_id_is_not_found() {
        let pool = memory_pool().await;
        let (patients, _, _) = services(&pool);

        let id = Uuid::new_v4();
        let err = patients.find_one(id).await.expect_err("missing patient");
        match err {
            ClinicaError::NotFound { entity, id: err_id } => {
                assert_eq!(entity, EntityKind::Patient);
                assert_eq!(err_id, id.to_string());
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_is_a_strict_merge() {
        let pool = memory_pool().await;
        let (patients, _, _) = services(&pool);

        let created = patients.create(create_dto()).await.expect("create");
        let updated = patients
            .update(
                created.id,
                UpdatePatientDto {
                    last_name: Some("García".into()),
                    ..UpdatePatientDto::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.last_name, "García");
        // Everything omitted from the payload is untouched.
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.birth_date, created.birth_date);
        assert_eq!(updated.gender, created.gender);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.created_at, created.created_at);

        let fetched = patients.find_one(created.id).await.expect("fetch");
        assert_eq!(fetched.last_name, "García");
        assert_eq!(fetched.first_name, "Juan");
    }

    #[tokio::test]
    async fn update_reparses_date_fields() {
        let pool = memory_pool().await;
        let (patients, _, _) = services(&pool);

        let created = patients.create(create_dto()).await.expect("create");
        let updated = patients
            .update(
                created.id,
                UpdatePatientDto {
                    birth_date: Some("1979-12-31".into()),
                    ..UpdatePatientDto::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(
            updated.birth_date,
            NaiveDate::from_ymd_opt(1979, 12, 31).expect("valid date")
        );
    }

    #[tokio::test]
    async fn deactivate_forces_inactivo_and_changes_nothing_else() {
        let pool = memory_pool().await;
        let (patients, _, _) = services(&pool);

        let created = patients
            .create(CreatePatientDto {
                status: Some("Seguimiento".into()),
                ..create_dto()
            })
            .await
            .expect("create");

        let deactivated = patients.deactivate(created.id).await.expect("deactivate");
        assert_eq!(deactivated.status, PatientStatus::Inactivo);
        assert_eq!(deactivated.first_name, created.first_name);
        assert_eq!(deactivated.gender, Gender::Masculino);
        assert_eq!(deactivated.birth_date, created.birth_date);

        // Deactivating an already inactive patient stays Inactivo.
        let again = patients.deactivate(created.id).await.expect("deactivate");
        assert_eq!(again.status, PatientStatus::Inactivo);
    }

    #[tokio::test]
    async fn invalid_create_persists_nothing() {
        let pool = memory_pool().await;
        let (patients, _, _) = services(&pool);

        let err = patients
            .create(CreatePatientDto {
                gender: "Unknown".into(),
                ..create_dto()
            })
            .await
            .expect_err("invalid gender");
        assert!(matches!(err, ClinicaError::InvalidInput(_)));

        assert!(patients.find_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn find_one_hydrates_records_with_tumor_types() {
        let pool = memory_pool().await;
        let (patients, tumor_types, records) = services(&pool);

        let tumor_type = tumor_types
            .create(CreateTumorTypeDto {
                name: "Cáncer de Mama".into(),
                system_affected: "Glándulas".into(),
                description: None,
            })
            .await
            .expect("create tumor type");
        let patient = patients.create(create_dto()).await.expect("create patient");
        records
            .create(CreateClinicalRecordDto {
                patient_id: patient.id.to_string(),
                tumor_type_id: tumor_type.id,
                diagnosis_date: "2024-01-15".into(),
                stage: "IIA".into(),
                treatment_protocol: "Quimioterapia".into(),
                notes: None,
            })
            .await
            .expect("create record");

        let hydrated = patients.find_one(patient.id).await.expect("fetch");
        let hydrated_records = hydrated.clinical_records.expect("records loaded");
        assert_eq!(hydrated_records.len(), 1);
        let nested_type = hydrated_records[0]
            .tumor_type
            .as_ref()
            .expect("tumor type loaded");
        assert_eq!(nested_type.name, "Cáncer de Mama");
    }
}
