//! Patient resource handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use clinica_core::dto::{CreatePatientDto, UpdatePatientDto};
use clinica_core::entities::Patient;

use crate::error::{ApiError, ErrorBody};
use crate::extract::ApiJson;
use crate::AppState;

/// Optional filters for patient listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListPatientsQuery {
    /// Exact-match filter on patient status.
    pub status: Option<String>,
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientDto,
    responses(
        (status = 201, description = "Paciente creado exitosamente.", body = Patient),
        (status = 400, description = "Datos inválidos.", body = ErrorBody)
    ),
    tag = "patients"
)]
/// Create a new patient. `status` defaults to `Activo` when omitted.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreatePatientDto>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state.patients.create(dto).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/patients",
    params(ListPatientsQuery),
    responses(
        (status = 200, description = "Lista de pacientes obtenida exitosamente.", body = [Patient])
    ),
    tag = "patients"
)]
/// List patients newest-first, optionally filtered by status.
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPatientsQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = match query.status {
        Some(status) => state.patients.find_by_status(&status).await?,
        None => state.patients.find_all().await?,
    };
    Ok(Json(patients))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "ID del paciente")),
    responses(
        (status = 200, description = "Paciente encontrado.", body = Patient),
        (status = 404, description = "Paciente no encontrado.", body = ErrorBody)
    ),
    tag = "patients"
)]
/// Fetch one patient with its clinical records and their tumor types.
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.patients.find_one(id).await?;
    Ok(Json(patient))
}

#[utoipa::path(
    patch,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "ID del paciente")),
    request_body = UpdatePatientDto,
    responses(
        (status = 200, description = "Paciente actualizado exitosamente.", body = Patient),
        (status = 400, description = "Datos inválidos.", body = ErrorBody),
        (status = 404, description = "Paciente no encontrado.", body = ErrorBody)
    ),
    tag = "patients"
)]
/// Partial update; fields absent from the payload are left untouched.
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(dto): ApiJson<UpdatePatientDto>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.patients.update(id, dto).await?;
    Ok(Json(patient))
}

#[utoipa::path(
    patch,
    path = "/patients/{id}/deactivate",
    params(("id" = Uuid, Path, description = "ID del paciente")),
    responses(
        (status = 200, description = "Paciente desactivado exitosamente.", body = Patient),
        (status = 404, description = "Paciente no encontrado.", body = ErrorBody)
    ),
    tag = "patients"
)]
/// Force the patient's status to `Inactivo`, leaving every other field as
/// it was.
#[axum::debug_handler]
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.patients.deactivate(id).await?;
    Ok(Json(patient))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "ID del paciente")),
    responses(
        (status = 200, description = "Paciente eliminado exitosamente."),
        (status = 404, description = "Paciente no encontrado.", body = ErrorBody)
    ),
    tag = "patients"
)]
/// Remove a patient; the store cascades to its clinical records.
#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.patients.remove(id).await?;
    Ok(StatusCode::OK)
}
