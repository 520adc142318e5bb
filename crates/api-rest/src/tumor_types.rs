//! Tumor type resource handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use clinica_core::dto::{CreateTumorTypeDto, UpdateTumorTypeDto};
use clinica_core::entities::TumorType;

use crate::error::{ApiError, ErrorBody};
use crate::extract::ApiJson;
use crate::AppState;

/// Optional filters for tumor type listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTumorTypesQuery {
    /// Exact-match filter on the affected system.
    pub system: Option<String>,
}

#[utoipa::path(
    post,
    path = "/tumor-types",
    request_body = CreateTumorTypeDto,
    responses(
        (status = 201, description = "Tipo de tumor creado exitosamente.", body = TumorType),
        (status = 400, description = "Datos inválidos.", body = ErrorBody)
    ),
    tag = "tumor-types"
)]
/// Create a new tumor type.
#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreateTumorTypeDto>,
) -> Result<(StatusCode, Json<TumorType>), ApiError> {
    let tumor_type = state.tumor_types.create(dto).await?;
    Ok((StatusCode::CREATED, Json(tumor_type)))
}

#[utoipa::path(
    get,
    path = "/tumor-types",
    params(ListTumorTypesQuery),
    responses(
        (status = 200, description = "Lista de tipos de tumor obtenida exitosamente.", body = [TumorType])
    ),
    tag = "tumor-types"
)]
/// List tumor types alphabetically, optionally filtered by affected system.
#[axum::debug_handler]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListTumorTypesQuery>,
) -> Result<Json<Vec<TumorType>>, ApiError> {
    let tumor_types = match query.system {
        Some(system) => state.tumor_types.find_by_system(&system).await?,
        None => state.tumor_types.find_all().await?,
    };
    Ok(Json(tumor_types))
}

#[utoipa::path(
    get,
    path = "/tumor-types/{id}",
    params(("id" = i64, Path, description = "ID del tipo de tumor")),
    responses(
        (status = 200, description = "Tipo de tumor encontrado.", body = TumorType),
        (status = 404, description = "Tipo de tumor no encontrado.", body = ErrorBody)
    ),
    tag = "tumor-types"
)]
/// Fetch one tumor type with its clinical records and their patients.
#[axum::debug_handler]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TumorType>, ApiError> {
    let tumor_type = state.tumor_types.find_one(id).await?;
    Ok(Json(tumor_type))
}

#[utoipa::path(
    patch,
    path = "/tumor-types/{id}",
    params(("id" = i64, Path, description = "ID del tipo de tumor")),
    request_body = UpdateTumorTypeDto,
    responses(
        (status = 200, description = "Tipo de tumor actualizado exitosamente.", body = TumorType),
        (status = 400, description = "Datos inválidos.", body = ErrorBody),
        (status = 404, description = "Tipo de tumor no encontrado.", body = ErrorBody)
    ),
    tag = "tumor-types"
)]
/// Partial update; fields absent from the payload are left untouched.
#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(dto): ApiJson<UpdateTumorTypeDto>,
) -> Result<Json<TumorType>, ApiError> {
    let tumor_type = state.tumor_types.update(id, dto).await?;
    Ok(Json(tumor_type))
}

#[utoipa::path(
    delete,
    path = "/tumor-types/{id}",
    params(("id" = i64, Path, description = "ID del tipo de tumor")),
    responses(
        (status = 200, description = "Tipo de tumor eliminado exitosamente."),
        (status = 404, description = "Tipo de tumor no encontrado.", body = ErrorBody),
        (status = 409, description = "Tipo de tumor referenciado por historias clínicas.", body = ErrorBody)
    ),
    tag = "tumor-types"
)]
/// Remove a tumor type. One still referenced by clinical records is
/// protected by the store's foreign key.
#[axum::debug_handler]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.tumor_types.remove(id).await?;
    Ok(StatusCode::OK)
}
