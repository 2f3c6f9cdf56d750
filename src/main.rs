mod modules;

use anyhow::Context;

use folio_kernel::settings::Settings;
use folio_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Folio settings")?;

    folio_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "folio-app bootstrap starting"
    );

    let pool = folio_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let migrations = registry.collect_migrations();
    folio_db::run_migrations(&pool, &migrations).await?;

    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!("folio-app bootstrap complete");

    folio_http::start_server(&registry, &settings, &pool).await?;

    registry.stop_all().await?;

    Ok(())
}
