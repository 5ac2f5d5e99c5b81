use std::sync::Arc;

use prodcat_core::config::{AppConfig, ConfigError, LoadOptions};
use prodcat_core::{CategoryCatalog, ProductControllers, StaticCategoryCatalog};
use prodcat_db::{connect_with_config, migrations, DbPool, SqlProductStore};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub catalog: Arc<dyn CategoryCatalog>,
    pub controllers: ProductControllers,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Connects, migrates and wires every controller over one SQL store and the
/// reference category catalog.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool =
        connect_with_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        max_connections = config.database.max_connections,
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let catalog: Arc<dyn CategoryCatalog> = Arc::new(StaticCategoryCatalog::reference());
    let controllers =
        ProductControllers::new(Arc::new(SqlProductStore::new(db_pool.clone())), catalog.clone());
    info!(
        event_name = "system.bootstrap.controllers_wired",
        correlation_id = "bootstrap",
        category_count = catalog.categories().len(),
        "product controllers wired"
    );

    Ok(Application { config, db_pool, catalog, controllers })
}

#[cfg(test)]
mod tests {
    use prodcat_core::config::{ConfigOverrides, LoadOptions};
    use prodcat_core::{CategoryId, CreateProduct, ProductId, UpdateProduct};
    use rust_decimal::Decimal;

    use crate::bootstrap::{bootstrap, BootstrapError};

    fn overrides(database_url: &str) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some(database_url.to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_database_url() {
        let result = bootstrap(overrides("postgres://localhost/catalog")).await;

        let error = result.err().expect("bootstrap should fail");
        assert!(matches!(error, BootstrapError::Config(_)));
        assert!(error.to_string().contains("database.url"));
    }

    #[tokio::test]
    async fn integration_smoke_covers_schema_and_product_lifecycle() {
        let app = bootstrap(overrides("sqlite::memory:")).await.expect("bootstrap");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'product'",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("product table should exist after bootstrap");
        assert_eq!(table_count, 1);

        let created = app
            .controllers
            .create
            .execute(CreateProduct {
                name: "Iced Tea".to_string(),
                description: "Peach".to_string(),
                category_id: CategoryId(3),
                amount: Decimal::new(325, 2),
            })
            .await
            .expect("create through SQL store");
        let id = ProductId(created.product_id.clone());

        let updated = app
            .controllers
            .update
            .execute(UpdateProduct {
                name: "Iced Green Tea".to_string(),
                ..UpdateProduct::for_product(id.clone())
            })
            .await
            .expect("update");
        assert_eq!(updated.amount, Decimal::new(325, 2));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let listed =
            app.controllers.find_by_category.execute(CategoryId(3)).await.expect("list drinks");
        assert_eq!(listed.content, vec![updated]);

        app.controllers.delete.execute(&id).await.expect("delete");
        assert!(app.controllers.find_one.execute(&id).await.is_err());

        app.db_pool.close().await;
    }
}
