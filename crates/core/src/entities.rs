//! Persisted record types.
//!
//! Each entity maps one-to-one onto a storage table. Relation fields
//! (`clinical_records`, `patient`, `tumor_type`) are not columns: the service
//! layer fills them when a read eagerly resolves related records, and they
//! are omitted from JSON otherwise.
//!
//! JSON uses camelCase field names; dates are `YYYY-MM-DD` strings and
//! timestamps are RFC 3339, matching the service's wire format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Error returned when a closed enumeration is parsed from an unknown wire
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownVariant;

/// Patient gender. Closed set; validation rejects anything else before it
/// reaches storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
pub enum Gender {
    Masculino,
    Femenino,
    Otro,
}

impl Gender {
    /// Accepted wire values, in declaration order.
    pub const VALUES: [&'static str; 3] = ["Masculino", "Femenino", "Otro"];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gender::Masculino => "Masculino",
            Gender::Femenino => "Femenino",
            Gender::Otro => "Otro",
        };
        f.write_str(name)
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Masculino" => Ok(Gender::Masculino),
            "Femenino" => Ok(Gender::Femenino),
            "Otro" => Ok(Gender::Otro),
            _ => Err(UnknownVariant),
        }
    }
}

/// Patient lifecycle status. Defaults to `Activo` on creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
pub enum PatientStatus {
    Activo,
    Seguimiento,
    Inactivo,
}

impl PatientStatus {
    /// Accepted wire values, in declaration order.
    pub const VALUES: [&'static str; 3] = ["Activo", "Seguimiento", "Inactivo"];
}

impl Default for PatientStatus {
    fn default() -> Self {
        PatientStatus::Activo
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatientStatus::Activo => "Activo",
            PatientStatus::Seguimiento => "Seguimiento",
            PatientStatus::Inactivo => "Inactivo",
        };
        f.write_str(name)
    }
}

impl FromStr for PatientStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Activo" => Ok(PatientStatus::Activo),
            "Seguimiento" => Ok(PatientStatus::Seguimiento),
            "Inactivo" => Ok(PatientStatus::Inactivo),
            _ => Err(UnknownVariant),
        }
    }
}

/// A patient under clinical management.
///
/// Owns zero or more [`ClinicalRecord`]s; deleting a patient cascades to its
/// records through the store's foreign-key policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Generated on creation, immutable.
    pub id: Uuid,
    #[schema(example = "Juan")]
    pub first_name: String,
    #[schema(example = "Pérez")]
    pub last_name: String,
    #[schema(example = "1980-05-15")]
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub status: PatientStatus,
    /// Present only when a read eagerly resolves the patient's records.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_records: Option<Vec<ClinicalRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tumor classification, reference data for clinical records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TumorType {
    /// Auto-incremented by the store.
    pub id: i64,
    #[schema(example = "Cáncer de Mama")]
    pub name: String,
    #[schema(example = "Glándulas")]
    pub system_affected: String,
    pub description: Option<String>,
    /// Present only when a read eagerly resolves the type's records.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_records: Option<Vec<ClinicalRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A diagnosis linking one patient to one tumor type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalRecord {
    /// Generated on creation, immutable.
    pub id: Uuid,
    pub patient_id: Uuid,
    pub tumor_type_id: i64,
    #[schema(example = "2024-01-15")]
    pub diagnosis_date: NaiveDate,
    /// Free-form staging code, e.g. "IIA".
    #[schema(example = "IIA")]
    pub stage: String,
    pub treatment_protocol: String,
    pub notes: Option<String>,
    /// Present only when a read eagerly resolves the owning patient.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,
    /// Present only when a read eagerly resolves the tumor type.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tumor_type: Option<TumorType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
