//! Database pool construction and schema management.
//!
//! The schema is created idempotently at startup (`CREATE TABLE IF NOT
//! EXISTS`); foreign keys are switched on for every connection so the store
//! enforces referential integrity and the delete cascade from patients to
//! their clinical records.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::ClinicaResult;

const CREATE_PATIENTS: &str = "\
CREATE TABLE IF NOT EXISTS patients (
    id BLOB PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    birth_date TEXT NOT NULL,
    gender TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Activo',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_TUMOR_TYPES: &str = "\
CREATE TABLE IF NOT EXISTS tumor_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    system_affected TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_CLINICAL_RECORDS: &str = "\
CREATE TABLE IF NOT EXISTS clinical_records (
    id BLOB PRIMARY KEY,
    patient_id BLOB NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    tumor_type_id INTEGER NOT NULL REFERENCES tumor_types(id),
    diagnosis_date TEXT NOT NULL,
    stage TEXT NOT NULL,
    treatment_protocol TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_patients_status ON patients(status)",
    "CREATE INDEX IF NOT EXISTS idx_clinical_records_patient ON clinical_records(patient_id)",
    "CREATE INDEX IF NOT EXISTS idx_clinical_records_tumor_type ON clinical_records(tumor_type_id)",
];

/// Opens a connection pool for the given database URL.
///
/// The database file is created when missing and foreign-key enforcement is
/// enabled on every connection.
///
/// # Errors
///
/// Returns a `Database` error when the URL cannot be parsed or the pool
/// cannot be established.
pub async fn connect(database_url: &str) -> ClinicaResult<SqlitePool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// Creates the tables and indexes if they do not exist. Idempotent; run at
/// startup before the service accepts traffic.
///
/// # Errors
///
/// Returns a `Database` error when any DDL statement fails.
pub async fn run_migrations(pool: &SqlitePool) -> ClinicaResult<()> {
    sqlx::query(CREATE_PATIENTS).execute(pool).await?;
    sqlx::query(CREATE_TUMOR_TYPES).execute(pool).await?;
    sqlx::query(CREATE_CLINICAL_RECORDS).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!("database schema ready");
    Ok(())
}

/// Single-connection in-memory pool with the schema applied, for tests.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let options = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()
        .expect("parse memory url")
        .foreign_keys(true);

    // One connection only: each in-memory SQLite connection is its own
    // database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect in-memory database");

    run_migrations(&pool).await.expect("create schema");
    pool
}
