//! # API REST
//!
//! REST surface for the clinical microservice.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation generated from the route annotations
//! - REST-specific concerns (JSON serialisation, status mapping, CORS)
//!
//! Domain logic lives in `clinica-core`; this crate only parses requests,
//! calls the services and maps outcomes to status codes.

#![warn(rust_2018_idioms)]

pub mod clinical_records;
pub mod error;
pub mod extract;
pub mod health;
pub mod patients;
pub mod tumor_types;

use axum::routing::{get, patch, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use clinica_core::dto::{
    CreateClinicalRecordDto, CreatePatientDto, CreateTumorTypeDto, UpdateClinicalRecordDto,
    UpdatePatientDto, UpdateTumorTypeDto,
};
use clinica_core::entities::{ClinicalRecord, Gender, Patient, PatientStatus, TumorType};
use clinica_core::repositories::{
    ClinicalRecordRepository, PatientRepository, TumorTypeRepository,
};
use clinica_core::{
    db, seed, ClinicaConfig, ClinicalRecordService, Environment, PatientService, TumorTypeService,
};

use crate::error::{ErrorBody, ErrorMessage};
use crate::health::HealthRes;

/// Application state shared across request handlers: one service per
/// resource.
#[derive(Clone)]
pub struct AppState {
    pub patients: PatientService,
    pub tumor_types: TumorTypeService,
    pub clinical_records: ClinicalRecordService,
}

impl AppState {
    /// Composition root: builds the repositories over the pool and injects
    /// them into the services.
    pub fn new(pool: SqlitePool) -> Self {
        let patients = PatientRepository::new(pool.clone());
        let tumor_types = TumorTypeRepository::new(pool.clone());
        let records = ClinicalRecordRepository::new(pool);

        Self {
            patients: PatientService::new(
                patients.clone(),
                records.clone(),
                tumor_types.clone(),
            ),
            tumor_types: TumorTypeService::new(
                tumor_types.clone(),
                records.clone(),
                patients.clone(),
            ),
            clinical_records: ClinicalRecordService::new(records, patients, tumor_types),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Microservicio Clínica",
        description = "API para gestión de información clínica de pacientes oncológicos"
    ),
    paths(
        health::health,
        patients::create,
        patients::list,
        patients::get,
        patients::update,
        patients::deactivate,
        patients::remove,
        tumor_types::create,
        tumor_types::list,
        tumor_types::get,
        tumor_types::update,
        tumor_types::remove,
        clinical_records::create,
        clinical_records::list,
        clinical_records::get,
        clinical_records::update,
        clinical_records::remove,
    ),
    components(schemas(
        HealthRes,
        ErrorBody,
        ErrorMessage,
        Patient,
        TumorType,
        ClinicalRecord,
        Gender,
        PatientStatus,
        CreatePatientDto,
        UpdatePatientDto,
        CreateTumorTypeDto,
        UpdateTumorTypeDto,
        CreateClinicalRecordDto,
        UpdateClinicalRecordDto,
    )),
    tags(
        (name = "health", description = "Health check del microservicio"),
        (name = "patients", description = "Gestión de pacientes"),
        (name = "tumor-types", description = "Gestión de tipos de tumor"),
        (name = "clinical-records", description = "Gestión de historias clínicas")
    )
)]
pub struct ApiDoc;

/// Builds the application router: resource routes, Swagger UI and CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/patients", post(patients::create).get(patients::list))
        .route(
            "/patients/:id",
            get(patients::get)
                .patch(patients::update)
                .delete(patients::remove),
        )
        .route("/patients/:id/deactivate", patch(patients::deactivate))
        .route(
            "/tumor-types",
            post(tumor_types::create).get(tumor_types::list),
        )
        .route(
            "/tumor-types/:id",
            get(tumor_types::get)
                .patch(tumor_types::update)
                .delete(tumor_types::remove),
        )
        .route(
            "/clinical-records",
            post(clinical_records::create).get(clinical_records::list),
        )
        .route(
            "/clinical-records/:id",
            get(clinical_records::get)
                .patch(clinical_records::update)
                .delete(clinical_records::remove),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves configuration, prepares the database (schema plus
/// development-mode seeding) and serves the REST API until the process
/// stops.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the database cannot be
/// opened, seeding fails or the listen address cannot be bound.
pub async fn run() -> anyhow::Result<()> {
    let cfg = ClinicaConfig::from_env()?;

    let pool = db::connect(cfg.database_url()).await?;
    db::run_migrations(&pool).await?;

    if cfg.environment() == Environment::Development {
        seed::seed_database(&pool).await?;
    }

    tracing::info!(
        "-- Starting {} REST API on {}",
        clinica_core::constants::SERVICE_NAME,
        cfg.rest_addr()
    );

    let app = build_router(AppState::new(pool));
    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
