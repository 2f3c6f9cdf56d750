//! HTTP server facade for Folio: Axum router assembly, response
//! envelopes, and request-error mapping.

use anyhow::Context;
use axum::{routing::get, Router};
use sqlx::SqlitePool;

use folio_kernel::settings::Settings;
use folio_kernel::{InitCtx, ModuleRegistry};

pub mod envelope;
pub mod error;
pub mod router;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry.
pub async fn start_server(
    registry: &ModuleRegistry,
    settings: &Settings,
    pool: &SqlitePool,
) -> anyhow::Result<()> {
    let app = build_router(registry, settings, pool);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Build the main HTTP router with global middleware and all module
/// routes mounted. Public so tests can drive the router without a socket.
pub fn build_router(registry: &ModuleRegistry, settings: &Settings, pool: &SqlitePool) -> Router {
    let ctx = InitCtx {
        settings,
        db: pool,
    };

    let mut builder = RouterBuilder::new()
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .route("/healthz", get(health_check));

    for module in registry.modules() {
        tracing::info!(
            module = module.name(),
            "mounting module routes under /api/{}",
            module.name()
        );
        builder = builder.mount_module(module.name(), module.routes(&ctx));
    }

    builder.build()
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
