//! Clinical record resource handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use clinica_core::dto::{CreateClinicalRecordDto, UpdateClinicalRecordDto};
use clinica_core::entities::ClinicalRecord;

use crate::error::{ApiError, ErrorBody};
use crate::extract::ApiJson;
use crate::AppState;

/// Optional filters for clinical record listing. When both are present the
/// patient filter wins.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListClinicalRecordsQuery {
    /// Exact-match filter on the owning patient.
    pub patient_id: Option<Uuid>,
    /// Exact-match filter on the tumor type.
    pub tumor_type_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/clinical-records",
    request_body = CreateClinicalRecordDto,
    responses(
        (status = 201, description = "Historia clínica creada exitosamente.", body = ClinicalRecord),
        (status = 400, description = "Datos inválidos.", body = ErrorBody),
        (status = 409, description = "Paciente o tipo de tumor inexistente.", body = ErrorBody)
    ),
    tag = "clinical-records"
)]
/// Create a new clinical record. A `patientId` or `tumorTypeId` that does
/// not resolve is rejected by the store's foreign keys.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreateClinicalRecordDto>,
) -> Result<(StatusCode, Json<ClinicalRecord>), ApiError> {
    let record = state.clinical_records.create(dto).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/clinical-records",
    params(ListClinicalRecordsQuery),
    responses(
        (status = 200, description = "Lista de historias clínicas obtenida exitosamente.", body = [ClinicalRecord])
    ),
    tag = "clinical-records"
)]
/// List clinical records newest diagnosis first, optionally filtered by
/// patient or tumor type.
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListClinicalRecordsQuery>,
) -> Result<Json<Vec<ClinicalRecord>>, ApiError> {
    let records = if let Some(patient_id) = query.patient_id {
        state.clinical_records.find_by_patient(patient_id).await?
    } else if let Some(tumor_type_id) = query.tumor_type_id {
        state
            .clinical_records
            .find_by_tumor_type(tumor_type_id)
            .await?
    } else {
        state.clinical_records.find_all().await?
    };
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/clinical-records/{id}",
    params(("id" = Uuid, Path, description = "ID de la historia clínica")),
    responses(
        (status = 200, description = "Historia clínica encontrada.", body = ClinicalRecord),
        (status = 404, description = "Historia clínica no encontrada.", body = ErrorBody)
    ),
    tag = "clinical-records"
)]
/// Fetch one clinical record with its patient and tumor type.
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClinicalRecord>, ApiError> {
    let record = state.clinical_records.find_one(id).await?;
    Ok(Json(record))
}

#[utoipa::path(
    patch,
    path = "/clinical-records/{id}",
    params(("id" = Uuid, Path, description = "ID de la historia clínica")),
    request_body = UpdateClinicalRecordDto,
    responses(
        (status = 200, description = "Historia clínica actualizada exitosamente.", body = ClinicalRecord),
        (status = 400, description = "Datos inválidos.", body = ErrorBody),
        (status = 404, description = "Historia clínica no encontrada.", body = ErrorBody)
    ),
    tag = "clinical-records"
)]
/// Partial update; `patientId` and `tumorTypeId` may be reassigned.
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(dto): ApiJson<UpdateClinicalRecordDto>,
) -> Result<Json<ClinicalRecord>, ApiError> {
    let record = state.clinical_records.update(id, dto).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/clinical-records/{id}",
    params(("id" = Uuid, Path, description = "ID de la historia clínica")),
    responses(
        (status = 200, description = "Historia clínica eliminada exitosamente."),
        (status = 404, description = "Historia clínica no encontrada.", body = ErrorBody)
    ),
    tag = "clinical-records"
)]
/// Remove a clinical record.
#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.clinical_records.remove(id).await?;
    Ok(StatusCode::OK)
}
