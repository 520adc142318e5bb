//! End-to-end tests driving the router over a throwaway database file.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_rest::{build_router, AppState};
use clinica_core::db;

struct TestApp {
    app: Router,
    // Held so the database file outlives the test.
    _dir: tempfile::TempDir,
}

async fn test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}/clinica-test.db?mode=rwc", dir.path().display());

    let pool = db::connect(&url).await.expect("connect database");
    db::run_migrations(&pool).await.expect("create schema");

    TestApp {
        app: build_router(AppState::new(pool)),
        _dir: dir,
    }
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(json) => builder
            .body(Body::from(json.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("dispatch request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON body")
    };

    (status, value)
}

#[tokio::test]
async fn health_reports_service_and_version() {
    let test = test_app().await;

    let (status, body) = request(&test.app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "microservicio-clinica");
    assert!(body["timestamp"].is_string());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn full_clinical_scenario() {
    let test = test_app().await;

    // Reference data first.
    let (status, tumor_type) = request(
        &test.app,
        "POST",
        "/tumor-types",
        Some(json!({"name": "Cáncer de Mama", "systemAffected": "Glándulas"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let tumor_type_id = tumor_type["id"].as_i64().expect("tumor type id");

    // Patient without an explicit status defaults to Activo.
    let (status, patient) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "Juan",
            "lastName": "Pérez",
            "birthDate": "1980-05-15",
            "gender": "Masculino"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(patient["status"], "Activo");
    let patient_id = patient["id"].as_str().expect("patient id").to_string();

    // Link both with a clinical record.
    let (status, record) = request(
        &test.app,
        "POST",
        "/clinical-records",
        Some(json!({
            "patientId": patient_id,
            "tumorTypeId": tumor_type_id,
            "diagnosisDate": "2024-01-15",
            "stage": "IIA",
            "treatmentProtocol": "Quimioterapia con doxorubicina y ciclofosfamida"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["diagnosisDate"], "2024-01-15");

    // The per-patient listing returns exactly one record with its tumor
    // type populated.
    let (status, records) = request(
        &test.app,
        "GET",
        &format!("/clinical-records?patientId={patient_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records.as_array().expect("array").len(), 1);
    assert_eq!(records[0]["stage"], "IIA");
    assert_eq!(records[0]["tumorType"]["name"], "Cáncer de Mama");

    // Deactivate, then confirm the status flipped and the records survived.
    let (status, deactivated) = request(
        &test.app,
        "PATCH",
        &format!("/patients/{patient_id}/deactivate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deactivated["status"], "Inactivo");

    let (status, fetched) =
        request(&test.app, "GET", &format!("/patients/{patient_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "Inactivo");
    assert_eq!(fetched["firstName"], "Juan");
    let clinical_records = fetched["clinicalRecords"].as_array().expect("records");
    assert_eq!(clinical_records.len(), 1);
    assert_eq!(clinical_records[0]["tumorType"]["name"], "Cáncer de Mama");
}

#[tokio::test]
async fn invalid_gender_is_rejected_and_nothing_persists() {
    let test = test_app().await;

    let (status, body) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "Juan",
            "lastName": "Pérez",
            "birthDate": "1980-05-15",
            "gender": "Unknown"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], "Bad Request");
    let messages = body["message"].as_array().expect("violations array");
    assert_eq!(
        messages[0],
        "gender must be one of the following values: Masculino, Femenino, Otro"
    );

    let (status, patients) = request(&test.app, "GET", "/patients", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(patients.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
    let test = test_app().await;

    let (status, body) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "Juan",
            "lastName": "Pérez",
            "birthDate": "1980-05-15",
            "gender": "Masculino",
            "isAdmin": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn missing_ids_map_to_404() {
    let test = test_app().await;

    let (status, body) = request(
        &test.app,
        "GET",
        "/patients/123e4567-e89b-12d3-a456-426614174000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(
        body["message"],
        "Paciente con ID 123e4567-e89b-12d3-a456-426614174000 no encontrado"
    );

    let (status, body) = request(&test.app, "GET", "/tumor-types/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tipo de tumor con ID 99 no encontrado");
}

#[tokio::test]
async fn malformed_path_ids_map_to_400() {
    let test = test_app().await;

    let (status, _) = request(&test.app, "GET", "/patients/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(&test.app, "GET", "/tumor-types/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_merges_only_present_fields() {
    let test = test_app().await;

    let (_, created) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "María",
            "lastName": "González",
            "birthDate": "1975-08-22",
            "gender": "Femenino",
            "status": "Seguimiento"
        })),
    )
    .await;
    let id = created["id"].as_str().expect("patient id").to_string();

    let (status, updated) = request(
        &test.app,
        "PATCH",
        &format!("/patients/{id}"),
        Some(json!({"lastName": "García"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["lastName"], "García");
    assert_eq!(updated["firstName"], "María");
    assert_eq!(updated["birthDate"], "1975-08-22");
    assert_eq!(updated["status"], "Seguimiento");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn listings_honour_their_orderings() {
    let test = test_app().await;

    for name in ["Leucemia", "Cáncer de Colon", "Cáncer de Mama"] {
        let (status, _) = request(
            &test.app,
            "POST",
            "/tumor-types",
            Some(json!({"name": name, "systemAffected": "Varios"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, tumor_types) = request(&test.app, "GET", "/tumor-types", None).await;
    let names: Vec<&str> = tumor_types
        .as_array()
        .expect("array")
        .iter()
        .map(|t| t["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Cáncer de Colon", "Cáncer de Mama", "Leucemia"]);

    for first_name in ["Primero", "Segundo"] {
        let (status, _) = request(
            &test.app,
            "POST",
            "/patients",
            Some(json!({
                "firstName": first_name,
                "lastName": "Prueba",
                "birthDate": "1990-01-01",
                "gender": "Otro"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, patients) = request(&test.app, "GET", "/patients", None).await;
    let first_names: Vec<&str> = patients
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["firstName"].as_str().expect("first name"))
        .collect();
    assert_eq!(first_names, vec!["Segundo", "Primero"]);
}

#[tokio::test]
async fn status_filter_matches_exactly() {
    let test = test_app().await;

    let (_, _) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "Activa",
            "lastName": "Prueba",
            "birthDate": "1990-01-01",
            "gender": "Femenino"
        })),
    )
    .await;
    let (_, _) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "Seguida",
            "lastName": "Prueba",
            "birthDate": "1990-01-01",
            "gender": "Femenino",
            "status": "Seguimiento"
        })),
    )
    .await;

    let (status, patients) = request(&test.app, "GET", "/patients?status=Seguimiento", None).await;
    assert_eq!(status, StatusCode::OK);
    let patients = patients.as_array().expect("array");
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["firstName"], "Seguida");
}

#[tokio::test]
async fn dangling_record_references_map_to_409() {
    let test = test_app().await;

    let (_, patient) = request(
        &test.app,
        "POST",
        "/patients",
        Some(json!({
            "firstName": "Juan",
            "lastName": "Pérez",
            "birthDate": "1980-05-15",
            "gender": "Masculino"
        })),
    )
    .await;
    let patient_id = patient["id"].as_str().expect("patient id");

    let (status, body) = request(
        &test.app,
        "POST",
        "/clinical-records",
        Some(json!({
            "patientId": patient_id,
            "tumorTypeId": 999,
            "diagnosisDate": "2024-01-15",
            "stage": "IIA",
            "treatmentProtocol": "Quimioterapia"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn delete_removes_the_row_then_404s() {
    let test = test_app().await;

    let (_, created) = request(
        &test.app,
        "POST",
        "/tumor-types",
        Some(json!({"name": "Leucemia", "systemAffected": "Hematológico"})),
    )
    .await;
    let id = created["id"].as_i64().expect("tumor type id");

    let (status, _) = request(&test.app, "DELETE", &format!("/tumor-types/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&test.app, "DELETE", &format!("/tumor-types/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let test = test_app().await;

    let (status, doc) = request(&test.app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/patients"].is_object());
    assert!(doc["paths"]["/patients/{id}/deactivate"].is_object());
    assert!(doc["paths"]["/clinical-records"].is_object());
}
