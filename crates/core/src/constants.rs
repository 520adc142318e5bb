//! Constants used throughout the clinica core crate.

/// Service name reported by the health endpoint and log lines.
pub const SERVICE_NAME: &str = "microservicio-clinica";

/// Default database URL when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://clinica.db?mode=rwc";

/// Default listen address when `CLINICA_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Maximum length for name-like columns (`first_name`, `last_name`, `name`,
/// `system_affected`).
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length for the free-form staging code on a clinical record.
pub const MAX_STAGE_LEN: usize = 10;
