//! Service layer: validation, not-found translation, strict-merge updates
//! and eager relation hydration over the repositories.
//!
//! Services never invent fallback values: a failed lookup is a `NotFound`,
//! a failed validation is an `InvalidInput`, and anything the store rejects
//! bubbles up unchanged.

pub mod clinical_record;
pub mod patient;
pub mod tumor_type;

pub use clinical_record::ClinicalRecordService;
pub use patient::PatientService;
pub use tumor_type::TumorTypeService;
