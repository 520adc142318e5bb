//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! services, so request handling never reads process-wide environment
//! variables.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_DATABASE_URL, DEFAULT_REST_ADDR};
use crate::error::{ClinicaError, ClinicaResult};

/// Deployment mode. Seeding only runs in `Development`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ClinicaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(ClinicaError::invalid_input(vec![format!(
                "CLINICA_ENV must be one of the following values: development, production (got {s})"
            )])),
        }
    }
}

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClinicaConfig {
    database_url: String,
    rest_addr: String,
    environment: Environment,
}

impl ClinicaConfig {
    /// Create a new `ClinicaConfig`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the database URL or listen address is
    /// blank.
    pub fn new(
        database_url: String,
        rest_addr: String,
        environment: Environment,
    ) -> ClinicaResult<Self> {
        if database_url.trim().is_empty() {
            return Err(ClinicaError::invalid_input(vec![
                "database_url cannot be empty".into(),
            ]));
        }
        if rest_addr.trim().is_empty() {
            return Err(ClinicaError::invalid_input(vec![
                "rest_addr cannot be empty".into(),
            ]));
        }

        Ok(Self {
            database_url,
            rest_addr,
            environment,
        })
    }

    /// Resolve the configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: store URL (default: `sqlite://clinica.db?mode=rwc`)
    /// - `CLINICA_REST_ADDR`: listen address (default: `0.0.0.0:3001`)
    /// - `CLINICA_ENV`: `development` or `production` (default: `development`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `CLINICA_ENV` holds an unknown value.
    pub fn from_env() -> ClinicaResult<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let rest_addr =
            std::env::var("CLINICA_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
        let environment = environment_from_env_value(std::env::var("CLINICA_ENV").ok())?;

        Self::new(database_url, rest_addr, environment)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

/// Parse the deployment environment from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `Development`.
pub fn environment_from_env_value(value: Option<String>) -> ClinicaResult<Environment> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<Environment>()).transpose()?;

    Ok(parsed.unwrap_or(Environment::Development))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_defaults_to_development() {
        let env = environment_from_env_value(None).expect("default");
        assert_eq!(env, Environment::Development);

        let env = environment_from_env_value(Some("  ".into())).expect("blank treated as unset");
        assert_eq!(env, Environment::Development);
    }

    #[test]
    fn environment_parses_known_values() {
        let env = environment_from_env_value(Some("production".into())).expect("production");
        assert_eq!(env, Environment::Production);
    }

    #[test]
    fn environment_rejects_unknown_values() {
        assert!(environment_from_env_value(Some("staging".into())).is_err());
    }

    #[test]
    fn config_rejects_blank_values() {
        assert!(ClinicaConfig::new("".into(), "0.0.0.0:3001".into(), Environment::Development)
            .is_err());
        assert!(ClinicaConfig::new(
            "sqlite://clinica.db".into(),
            " ".into(),
            Environment::Development
        )
        .is_err());
    }
}
