//! Validated request shapes.
//!
//! DTOs carry the raw payload (dates, enumerations and UUIDs arrive as
//! strings) and are distinct from the persisted entities. Each `validate()`
//! collects every field violation before failing, and on success produces a
//! typed insert model (`New*`) or patch (`*Patch`) that the repositories and
//! services consume, so no field is parsed twice.
//!
//! Unknown JSON fields are rejected by `deny_unknown_fields`, matching the
//! whitelist behaviour of the upstream service's validation pipeline.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::constants::{MAX_NAME_LEN, MAX_STAGE_LEN};
use crate::entities::{Gender, PatientStatus};
use crate::error::{ClinicaError, ClinicaResult};
use crate::validation::{
    check_date, check_enum, check_not_empty, check_required_text, check_uuid, finish,
};

// ============================================================================
// PATIENT
// ============================================================================

/// Payload for `POST /patients`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePatientDto {
    #[schema(example = "Juan")]
    pub first_name: String,
    #[schema(example = "Pérez")]
    pub last_name: String,
    /// Calendar date in `YYYY-MM-DD` form.
    #[schema(example = "1980-05-15")]
    pub birth_date: String,
    #[schema(example = "Masculino")]
    pub gender: String,
    /// Optional; defaults to `Activo`.
    #[serde(default)]
    #[schema(example = "Activo")]
    pub status: Option<String>,
}

/// Validated patient insert model.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub status: PatientStatus,
}

impl CreatePatientDto {
    /// Checks every field rule and produces the typed insert model.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicaError::InvalidInput`] carrying one message per
    /// violated rule.
    pub fn validate(&self) -> ClinicaResult<NewPatient> {
        let mut violations = Vec::new();

        check_required_text("firstName", &self.first_name, MAX_NAME_LEN, &mut violations);
        check_required_text("lastName", &self.last_name, MAX_NAME_LEN, &mut violations);
        let birth_date = check_date("birthDate", &self.birth_date, &mut violations);
        let gender = check_enum::<Gender>("gender", &self.gender, &Gender::VALUES, &mut violations);
        let status = match self.status.as_deref() {
            Some(raw) => {
                check_enum::<PatientStatus>("status", raw, &PatientStatus::VALUES, &mut violations)
            }
            None => Some(PatientStatus::default()),
        };

        match (birth_date, gender, status) {
            (Some(birth_date), Some(gender), Some(status)) if violations.is_empty() => {
                Ok(NewPatient {
                    first_name: self.first_name.clone(),
                    last_name: self.last_name.clone(),
                    birth_date,
                    gender,
                    status,
                })
            }
            _ => Err(ClinicaError::invalid_input(violations)),
        }
    }
}

/// Payload for `PATCH /patients/:id`. Every field optional; per-field rules
/// apply to whatever is present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePatientDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

/// Validated patient patch. `None` fields are left untouched by the merge.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub status: Option<PatientStatus>,
}

impl UpdatePatientDto {
    /// Checks the rules for every field present and produces the typed patch.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicaError::InvalidInput`] carrying one message per
    /// violated rule.
    pub fn validate(&self) -> ClinicaResult<PatientPatch> {
        let mut violations = Vec::new();

        if let Some(value) = &self.first_name {
            check_required_text("firstName", value, MAX_NAME_LEN, &mut violations);
        }
        if let Some(value) = &self.last_name {
            check_required_text("lastName", value, MAX_NAME_LEN, &mut violations);
        }
        let birth_date = self
            .birth_date
            .as_deref()
            .and_then(|raw| check_date("birthDate", raw, &mut violations));
        let gender = self
            .gender
            .as_deref()
            .and_then(|raw| check_enum::<Gender>("gender", raw, &Gender::VALUES, &mut violations));
        let status = self.status.as_deref().and_then(|raw| {
            check_enum::<PatientStatus>("status", raw, &PatientStatus::VALUES, &mut violations)
        });

        finish(violations)?;
        Ok(PatientPatch {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date,
            gender,
            status,
        })
    }
}

// ============================================================================
// TUMOR TYPE
// ============================================================================

/// Payload for `POST /tumor-types`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTumorTypeDto {
    #[schema(example = "Cáncer de Mama")]
    pub name: String,
    #[schema(example = "Glándulas")]
    pub system_affected: String,
    #[serde(default)]
    #[schema(example = "Tumor maligno que se desarrolla en el tejido mamario")]
    pub description: Option<String>,
}

/// Validated tumor type insert model.
#[derive(Debug, Clone)]
pub struct NewTumorType {
    pub name: String,
    pub system_affected: String,
    pub description: Option<String>,
}

impl CreateTumorTypeDto {
    /// Checks every field rule and produces the typed insert model.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicaError::InvalidInput`] carrying one message per
    /// violated rule.
    pub fn validate(&self) -> ClinicaResult<NewTumorType> {
        let mut violations = Vec::new();

        check_required_text("name", &self.name, MAX_NAME_LEN, &mut violations);
        check_required_text(
            "systemAffected",
            &self.system_affected,
            MAX_NAME_LEN,
            &mut violations,
        );

        finish(violations)?;
        Ok(NewTumorType {
            name: self.name.clone(),
            system_affected: self.system_affected.clone(),
            description: self.description.clone(),
        })
    }
}

/// Payload for `PATCH /tumor-types/:id`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTumorTypeDto {
    pub name: Option<String>,
    pub system_affected: Option<String>,
    pub description: Option<String>,
}

/// Validated tumor type patch.
#[derive(Debug, Clone, Default)]
pub struct TumorTypePatch {
    pub name: Option<String>,
    pub system_affected: Option<String>,
    pub description: Option<String>,
}

impl UpdateTumorTypeDto {
    /// Checks the rules for every field present and produces the typed patch.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicaError::InvalidInput`] carrying one message per
    /// violated rule.
    pub fn validate(&self) -> ClinicaResult<TumorTypePatch> {
        let mut violations = Vec::new();

        if let Some(value) = &self.name {
            check_required_text("name", value, MAX_NAME_LEN, &mut violations);
        }
        if let Some(value) = &self.system_affected {
            check_required_text("systemAffected", value, MAX_NAME_LEN, &mut violations);
        }

        finish(violations)?;
        Ok(TumorTypePatch {
            name: self.name.clone(),
            system_affected: self.system_affected.clone(),
            description: self.description.clone(),
        })
    }
}

// ============================================================================
// CLINICAL RECORD
// ============================================================================

/// Payload for `POST /clinical-records`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClinicalRecordDto {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub patient_id: String,
    #[schema(example = 1)]
    pub tumor_type_id: i64,
    /// Calendar date in `YYYY-MM-DD` form.
    #[schema(example = "2024-01-15")]
    pub diagnosis_date: String,
    #[schema(example = "IIA")]
    pub stage: String,
    #[schema(example = "Quimioterapia con doxorubicina y ciclofosfamida")]
    pub treatment_protocol: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Validated clinical record insert model.
#[derive(Debug, Clone)]
pub struct NewClinicalRecord {
    pub patient_id: Uuid,
    pub tumor_type_id: i64,
    pub diagnosis_date: NaiveDate,
    pub stage: String,
    pub treatment_protocol: String,
    pub notes: Option<String>,
}

impl CreateClinicalRecordDto {
    /// Checks every field rule and produces the typed insert model.
    ///
    /// Whether `patientId` and `tumorTypeId` resolve to existing records is
    /// left to the store's foreign-key constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicaError::InvalidInput`] carrying one message per
    /// violated rule.
    pub fn validate(&self) -> ClinicaResult<NewClinicalRecord> {
        let mut violations = Vec::new();

        let patient_id = check_uuid("patientId", &self.patient_id, &mut violations);
        let diagnosis_date = check_date("diagnosisDate", &self.diagnosis_date, &mut violations);
        check_required_text("stage", &self.stage, MAX_STAGE_LEN, &mut violations);
        check_not_empty("treatmentProtocol", &self.treatment_protocol, &mut violations);

        match (patient_id, diagnosis_date) {
            (Some(patient_id), Some(diagnosis_date)) if violations.is_empty() => {
                Ok(NewClinicalRecord {
                    patient_id,
                    tumor_type_id: self.tumor_type_id,
                    diagnosis_date,
                    stage: self.stage.clone(),
                    treatment_protocol: self.treatment_protocol.clone(),
                    notes: self.notes.clone(),
                })
            }
            _ => Err(ClinicaError::invalid_input(violations)),
        }
    }
}

/// Payload for `PATCH /clinical-records/:id`. `patientId` and `tumorTypeId`
/// are reassignable here; the record's own id is not.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateClinicalRecordDto {
    pub patient_id: Option<String>,
    pub tumor_type_id: Option<i64>,
    pub diagnosis_date: Option<String>,
    pub stage: Option<String>,
    pub treatment_protocol: Option<String>,
    pub notes: Option<String>,
}

/// Validated clinical record patch.
#[derive(Debug, Clone, Default)]
pub struct ClinicalRecordPatch {
    pub patient_id: Option<Uuid>,
    pub tumor_type_id: Option<i64>,
    pub diagnosis_date: Option<NaiveDate>,
    pub stage: Option<String>,
    pub treatment_protocol: Option<String>,
    pub notes: Option<String>,
}

impl UpdateClinicalRecordDto {
    /// Checks the rules for every field present and produces the typed patch.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicaError::InvalidInput`] carrying one message per
    /// violated rule.
    pub fn validate(&self) -> ClinicaResult<ClinicalRecordPatch> {
        let mut violations = Vec::new();

        let patient_id = self
            .patient_id
            .as_deref()
            .and_then(|raw| check_uuid("patientId", raw, &mut violations));
        let diagnosis_date = self
            .diagnosis_date
            .as_deref()
            .and_then(|raw| check_date("diagnosisDate", raw, &mut violations));
        if let Some(value) = &self.stage {
            check_required_text("stage", value, MAX_STAGE_LEN, &mut violations);
        }
        if let Some(value) = &self.treatment_protocol {
            check_not_empty("treatmentProtocol", value, &mut violations);
        }

        finish(violations)?;
        Ok(ClinicalRecordPatch {
            patient_id,
            tumor_type_id: self.tumor_type_id,
            diagnosis_date,
            stage: self.stage.clone(),
            treatment_protocol: self.treatment_protocol.clone(),
            notes: self.notes.clone(),
        })
    }
}
