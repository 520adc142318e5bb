//! Main entry point for the clinical microservice.
//!
//! Boots the REST API: resolves configuration from the environment, prepares
//! the relational store (schema plus development-mode seeding) and serves
//! until the process stops.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Starts the clinical microservice.
///
/// # Environment Variables
/// - `DATABASE_URL`: store URL (default: "sqlite://clinica.db?mode=rwc")
/// - `CLINICA_REST_ADDR`: listen address (default: "0.0.0.0:3001")
/// - `CLINICA_ENV`: "development" or "production" (default: "development")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinica_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    api_rest::run().await
}
