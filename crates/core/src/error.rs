//! Error taxonomy for the clinical service.
//!
//! Three domain error kinds exist: `InvalidInput` (the payload fails shape,
//! enumeration or length rules), `NotFound` (a referenced id does not
//! resolve) and `ConstraintViolation` (the store rejected a write due to a
//! foreign-key or uniqueness rule). Anything else the store raises is passed
//! through as `Database`.

/// Record families addressable by id, used in not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    TumorType,
    ClinicalRecord,
}

impl EntityKind {
    /// Human-readable not-found message, kept in the service's language.
    fn not_found_message(&self, id: &str) -> String {
        match self {
            EntityKind::Patient => format!("Paciente con ID {id} no encontrado"),
            EntityKind::TumorType => format!("Tipo de tumor con ID {id} no encontrado"),
            EntityKind::ClinicalRecord => format!("Historia clínica con ID {id} no encontrada"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClinicaError {
    /// The payload failed validation; carries one message per field violation.
    #[error("validation failed: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    /// The requested record does not exist.
    #[error("{}", .entity.not_found_message(.id))]
    NotFound { entity: EntityKind, id: String },

    /// The store rejected a write (foreign-key, uniqueness, not-null or
    /// check rule). Passed through largely unmodified.
    #[error("constraint violation: {0}")]
    ConstraintViolation(sqlx::Error),

    /// Any other storage failure.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl ClinicaError {
    /// Builds a `NotFound` for the given entity and id.
    pub fn not_found(entity: EntityKind, id: impl std::fmt::Display) -> Self {
        ClinicaError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Builds an `InvalidInput` from collected field violations.
    pub fn invalid_input(violations: Vec<String>) -> Self {
        ClinicaError::InvalidInput(violations)
    }
}

impl From<sqlx::Error> for ClinicaError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    ClinicaError::ConstraintViolation(err)
                }
                _ => ClinicaError::Database(err),
            },
            _ => ClinicaError::Database(err),
        }
    }
}

pub type ClinicaResult<T> = std::result::Result<T, ClinicaError>;
