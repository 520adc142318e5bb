//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, which is handy for development and
//! debugging. The workspace's main `clinica-run` binary is the deployment
//! entry point and does the same thing.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the standalone REST API server.
///
/// # Environment Variables
/// - `DATABASE_URL`: store URL (default: "sqlite://clinica.db?mode=rwc")
/// - `CLINICA_REST_ADDR`: listen address (default: "0.0.0.0:3001")
/// - `CLINICA_ENV`: "development" or "production" (default: "development")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the database cannot be opened or seeded, or
/// - the HTTP server fails while running.
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
