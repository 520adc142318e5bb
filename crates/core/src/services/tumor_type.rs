//! Tumor type operations.

use crate::dto::{CreateTumorTypeDto, UpdateTumorTypeDto};
use crate::entities::TumorType;
use crate::error::{ClinicaError, ClinicaResult, EntityKind};
use crate::repositories::{ClinicalRecordRepository, PatientRepository, TumorTypeRepository};

/// Orchestrates tumor type CRUD over the repositories.
///
/// Listings eagerly attach each type's clinical records; a single-record
/// read additionally resolves each record's patient.
#[derive(Clone)]
pub struct TumorTypeService {
    tumor_types: TumorTypeRepository,
    records: ClinicalRecordRepository,
    patients: PatientRepository,
}

impl TumorTypeService {
    /// Builds the service from its injected repositories.
    pub fn new(
        tumor_types: TumorTypeRepository,
        records: ClinicalRecordRepository,
        patients: PatientRepository,
    ) -> Self {
        Self {
            tumor_types,
            records,
            patients,
        }
    }

    /// Validates and persists a new tumor type.
    pub async fn create(&self, dto: CreateTumorTypeDto) -> ClinicaResult<TumorType> {
        let new = dto.validate()?;
        self.tumor_types.insert(new).await
    }

    /// All tumor types, alphabetical, each with its records attached.
    pub async fn find_all(&self) -> ClinicaResult<Vec<TumorType>> {
        let tumor_types = self.tumor_types.find_all().await?;
        self.attach_records(tumor_types).await
    }

    /// Tumor types for the given affected system, alphabetical, with records
    /// attached.
    pub async fn find_by_system(&self, system_affected: &str) -> ClinicaResult<Vec<TumorType>> {
        let tumor_types = self.tumor_types.find_by_system(system_affected).await?;
        self.attach_records(tumor_types).await
    }

    /// One tumor type with records and, transitively, each record's patient.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve.
    pub async fn find_one(&self, id: i64) -> ClinicaResult<TumorType> {
        let mut tumor_type = self.require(id).await?;

        let mut records = self.records.find_by_tumor_type(id).await?;
        for record in &mut records {
            record.patient = self.patients.find_by_id(record.patient_id).await?;
        }
        tumor_type.clinical_records = Some(records);

        Ok(tumor_type)
    }

    /// Strict-merge partial update: fields absent from the payload keep
    /// their current values.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a present field violates its rule; `NotFound`
    /// when the id does not resolve.
    pub async fn update(&self, id: i64, dto: UpdateTumorTypeDto) -> ClinicaResult<TumorType> {
        let patch = dto.validate()?;
        let mut tumor_type = self.require(id).await?;

        if let Some(name) = patch.name {
            tumor_type.name = name;
        }
        if let Some(system_affected) = patch.system_affected {
            tumor_type.system_affected = system_affected;
        }
        if let Some(description) = patch.description {
            tumor_type.description = Some(description);
        }

        self.tumor_types.update(&mut tumor_type).await?;
        Ok(tumor_type)
    }

    /// Physical removal.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not resolve. A type still referenced by
    /// clinical records is protected by the store's foreign key and surfaces
    /// as a constraint violation.
    pub async fn remove(&self, id: i64) -> ClinicaResult<()> {
        if !self.tumor_types.delete(id).await? {
            return Err(ClinicaError::not_found(EntityKind::TumorType, id));
        }
        Ok(())
    }

    async fn require(&self, id: i64) -> ClinicaResult<TumorType> {
        self.tumor_types
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinicaError::not_found(EntityKind::TumorType, id))
    }

    async fn attach_records(
        &self,
        mut tumor_types: Vec<TumorType>,
    ) -> ClinicaResult<Vec<TumorType>> {
        for tumor_type in &mut tumor_types {
            tumor_type.clinical_records =
                Some(self.records.find_by_tumor_type(tumor_type.id).await?);
        }
        Ok(tumor_types)
    }
}
