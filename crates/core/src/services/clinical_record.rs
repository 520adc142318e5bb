//! Clinical record operations.

use uuid::Uuid;

use crate::dto::{CreateClinicalRecordDto, UpdateClinicalRecordDto};
use crate::entities::ClinicalRecord;
use crate::error::{ClinicaError, ClinicaResult, EntityKind};
use crate::repositories::{ClinicalRecordRepository, PatientRepository, TumorTypeRepository};

/// Orchestrates clinical record CRUD over the repositories.
///
/// Full listings and single reads eagerly attach the owning patient and the
/// tumor type; the per-patient lookup attaches tumor types only and the
/// per-type lookup attaches patients only, mirroring what each caller
/// already knows.
#[derive(Clone)]
pub struct ClinicalRecordService {
    records: ClinicalRecordRepository,
    patients: PatientRepository,
    tumor_types: TumorTypeRepository,
}

impl ClinicalRecordService {
    /// Builds the service from its injected repositories.
    pub fn new(
        records: ClinicalRecordRepository,
        patients: PatientRepository,
        tumor_types: TumorTypeRepository,
    ) -> Self {
        Self {
            records,
            patients,
            tumor_types,
        }
    }

    /// Validates and persists a new clinical record. Whether the referenced
    /// patient and tumor type exist is the store's check: a dangling id
    /// surfaces as a constraint violation.
    pub async fn create(&self, dto: CreateClinicalRecordDto) -> ClinicaResult<ClinicalRecord> {
        let new = dto.validate()?;
        self.records.insert(new).await
    }

    /// All records, newest diagnosis first, with patient and tumor type
    /// attached.
    pub async fn find_all(&self) -> ClinicaResult<Vec<ClinicalRecord>> {
        let mut records = self.records.find_all().await?;
        for record in &mut records {
            record.patient = self.patients.find_by_id(record.patient_id).await?;
            record.tumor_type = self.tumor_types.find_by_id(record.tumor_type_id).await?;
        }
        Ok(records)
    }

    /// One record with patient and tumor type attached.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve.
    pub async fn find_one(&self, id: Uuid) -> ClinicaResult<ClinicalRecord> {
        let mut record = self.require(id).await?;
        record.patient = self.patients.find_by_id(record.patient_id).await?;
        record.tumor_type = self.tumor_types.find_by_id(record.tumor_type_id).await?;
        Ok(record)
    }

    /// Records for one patient, newest diagnosis first, each with its tumor
    /// type attached.
    pub async fn find_by_patient(&self, patient_id: Uuid) -> ClinicaResult<Vec<ClinicalRecord>> {
        let mut records = self.records.find_by_patient(patient_id).await?;
        for record in &mut records {
            record.tumor_type = self.tumor_types.find_by_id(record.tumor_type_id).await?;
        }
        Ok(records)
    }

    /// Records for one tumor type, newest diagnosis first, each with its
    /// patient attached.
    pub async fn find_by_tumor_type(
        &self,
        tumor_type_id: i64,
    ) -> ClinicaResult<Vec<ClinicalRecord>> {
        let mut records = self.records.find_by_tumor_type(tumor_type_id).await?;
        for record in &mut records {
            record.patient = self.patients.find_by_id(record.patient_id).await?;
        }
        Ok(records)
    }

    /// Strict-merge partial update. `patientId` and `tumorTypeId` are
    /// reassignable here; date fields are reparsed from their string form.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a present field violates its rule; `NotFound`
    /// when the id does not resolve.
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateClinicalRecordDto,
    ) -> ClinicaResult<ClinicalRecord> {
        let patch = dto.validate()?;
        let mut record = self.require(id).await?;

        if let Some(patient_id) = patch.patient_id {
            record.patient_id = patient_id;
        }
        if let Some(tumor_type_id) = patch.tumor_type_id {
            record.tumor_type_id = tumor_type_id;
        }
        if let Some(diagnosis_date) = patch.diagnosis_date {
            record.diagnosis_date = diagnosis_date;
        }
        if let Some(stage) = patch.stage {
            record.stage = stage;
        }
        if let Some(treatment_protocol) = patch.treatment_protocol {
            record.treatment_protocol = treatment_protocol;
        }
        if let Some(notes) = patch.notes {
            record.notes = Some(notes);
        }

        self.records.update(&mut record).await?;
        Ok(record)
    }

    /// Physical removal.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve.
    pub async fn remove(&self, id: Uuid) -> ClinicaResult<()> {
        if !self.records.delete(id).await? {
            return Err(ClinicaError::not_found(EntityKind::ClinicalRecord, id));
        }
        Ok(())
    }

    async fn require(&self, id: Uuid) -> ClinicaResult<ClinicalRecord> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinicaError::not_found(EntityKind::ClinicalRecord, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::dto::{CreatePatientDto, CreateTumorTypeDto};
    use crate::entities::{Patient, TumorType};
    use crate::services::{PatientService, TumorTypeService};
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

    async fn fixtures(pool: &SqlitePool) -> (Patient, TumorType) {
        let (patients, tumor_types, _) = services(pool);
        let patient = patients
            .create(CreatePatientDto {
                first_name: "Juan".into(),
                last_name: "Pérez".into(),
                birth_date: "1980-05-15".into(),
                gender: "Masculino".into(),
                status: None,
            })
            .await
            .expect("create patient");
        let tumor_type = tumor_types
            .create(CreateTumorTypeDto {
                name: "Cáncer de Mama".into(),
                system_affected: "Glándulas".into(),
                description: None,
            })
            .await
            .expect("create tumor type");
        (patient, tumor_type)
    }

    fn create_dto(patient_id: Uuid, tumor_type_id: i64) -> CreateClinicalRecordDto {
        CreateClinicalRecordDto {
            patient_id: patient_id.to_string(),
            tumor_type_id,
            diagnosis_date: "2024-01-15".into(),
            stage: "IIA".into(),
            treatment_protocol: "Quimioterapia con doxorubicina y ciclofosfamida".into(),
            notes: Some("Paciente responde bien al tratamiento".into()),
        }
    }

    #[tokio::test]
    async fn find_one_hydrates_patient_and_tumor_type() {
        let pool = memory_pool().await;
        let (patient, tumor_type) = fixtures(&pool).await;
        let (_, _, records) = services(&pool);

        let created = records
            .create(create_dto(patient.id, tumor_type.id))
            .await
            .expect("create record");
        let fetched = records.find_one(created.id).await.expect("fetch");

        assert_eq!(fetched.patient.as_ref().expect("patient loaded").id, patient.id);
        assert_eq!(
            fetched.tumor_type.as_ref().expect("tumor type loaded").name,
            "Cáncer de Mama"
        );
    }

    #[tokio::test]
    async fn filtered_lookups_hydrate_the_other_side_only() {
        let pool = memory_pool().await;
        let (patient, tumor_type) = fixtures(&pool).await;
        let (_, _, records) = services(&pool);

        records
            .create(create_dto(patient.id, tumor_type.id))
            .await
            .expect("create record");

        let by_patient = records.find_by_patient(patient.id).await.expect("query");
        assert_eq!(by_patient.len(), 1);
        assert!(by_patient[0].patient.is_none());
        assert!(by_patient[0].tumor_type.is_some());

        let by_type = records
            .find_by_tumor_type(tumor_type.id)
            .await
            .expect("query");
        assert_eq!(by_type.len(), 1);
        assert!(by_type[0].patient.is_some());
        assert!(by_type[0].tumor_type.is_none());
    }

    #[tokio::test]
    async fn update_can_reassign_foreign_keys() {
        let pool = memory_pool().await;
        let (patient, tumor_type) = fixtures(&pool).await;
        let (_, tumor_types, records) = services(&pool);

        let other_type = tumor_types
            .create(CreateTumorTypeDto {
                name: "Cáncer de Pulmón".into(),
                system_affected: "Respiratorio".into(),
                description: None,
            })
            .await
            .expect("create tumor type");

        let created = records
            .create(create_dto(patient.id, tumor_type.id))
            .await
            .expect("create record");
        let updated = records
            .update(
                created.id,
                UpdateClinicalRecordDto {
                    tumor_type_id: Some(other_type.id),
                    stage: Some("IIIB".into()),
                    ..UpdateClinicalRecordDto::default()
                },
            )
            .await
            .expect("update");

        assert_eq!(updated.tumor_type_id, other_type.id);
        assert_eq!(updated.stage, "IIIB");
        // Untouched fields survive the merge.
        assert_eq!(updated.patient_id, patient.id);
        assert_eq!(updated.treatment_protocol, created.treatment_protocol);
        assert_eq!(updated.notes, created.notes);
    }

    #[tokio::test]
    async fn reassigning_to_a_missing_tumor_type_is_a_constraint_violation() {
        let pool = memory_pool().await;
        let (patient, tumor_type) = fixtures(&pool).await;
        let (_, _, records) = services(&pool);

        let created = records
            .create(create_dto(patient.id, tumor_type.id))
            .await
            .expect("create record");
        let err = records
            .update(
                created.id,
                UpdateClinicalRecordDto {
                    tumor_type_id: Some(999),
                    ..UpdateClinicalRecordDto::default()
                },
            )
            .await
            .expect_err("dangling tumor type id");
        assert!(matches!(err, ClinicaError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn remove_missing_id_is_not_found() {
        let pool = memory_pool().await;
        let (_, _, records) = services(&pool);

        let err = records
            .remove(Uuid::new_v4())
            .await
            .expect_err("missing record");
        assert!(matches!(
            err,
            ClinicaError::NotFound {
                entity: EntityKind::ClinicalRecord,
                ..
            }
        ));
    }
}
