//! Repository access: per-entity CRUD and filtered lookups against the
//! backing store.
//!
//! Repositories speak SQL and nothing else: not-found translation, partial
//! update merging and relation hydration live in the service layer. Writes
//! persist immediately; deletes are physical removal.

pub mod clinical_record;
pub mod patient;
pub mod tumor_type;

pub use clinical_record::ClinicalRecordRepository;
pub use patient::PatientRepository;
pub use tumor_type::TumorTypeRepository;
