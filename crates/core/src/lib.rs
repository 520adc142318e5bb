//! # Clinica Core
//!
//! Core domain logic for the clinical microservice: the entity model for
//! patients, tumor types and clinical records, request validation, repository
//! access over the relational store, and the service layer that orchestrates
//! them.
//!
//! **No API concerns**: HTTP routing, status-code mapping and OpenAPI
//! generation belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod validation;

pub use config::{ClinicaConfig, Environment};
pub use entities::{ClinicalRecord, Gender, Patient, PatientStatus, TumorType};
pub use error::{ClinicaError, ClinicaResult, EntityKind};
pub use services::{ClinicalRecordService, PatientService, TumorTypeService};
