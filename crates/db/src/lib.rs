//! SQLite connection pool and module migration runner.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use folio_kernel::settings::DatabaseSettings;
use folio_kernel::Migration;

/// Open the connection pool described by the database settings, creating
/// the database file if it does not exist yet.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .with_context(|| "failed to open database connection pool")?;

    tracing::info!(url = %settings.url, "database pool ready");

    Ok(pool)
}

/// Apply module migrations in the order the registry collected them.
/// Migrations are expected to be idempotent; there is no applied-migration
/// ledger.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    for (module, migration) in migrations {
        tracing::info!(module = %module, id = migration.id, "applying migration");

        sqlx::raw_sql(migration.up)
            .execute(pool)
            .await
            .with_context(|| {
                format!("migration '{}' from module '{}' failed", migration.id, module)
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_settings() -> DatabaseSettings {
        DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn connect_opens_in_memory_pool() {
        let pool = connect(&memory_settings()).await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn migrations_run_in_order_and_are_idempotent() {
        let pool = connect(&memory_settings()).await.unwrap();
        let migrations = vec![(
            "test".to_string(),
            Migration {
                id: "001_init",
                up: "CREATE TABLE IF NOT EXISTS widgets (id INTEGER PRIMARY KEY);",
            },
        )];

        run_migrations(&pool, &migrations).await.unwrap();
        run_migrations(&pool, &migrations).await.unwrap();

        sqlx::query("INSERT INTO widgets (id) VALUES (1)")
            .execute(&pool)
            .await
            .unwrap();
    }
}
