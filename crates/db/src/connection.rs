use std::time::Duration;

use prodcat_core::config::DatabaseConfig;
use sqlx::sqlite::SqlitePoolOptions;

pub type DbPool = sqlx::SqlitePool;

pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    connect_with_settings(database_url, 5, 30).await
}

pub async fn connect_with_config(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    connect_with_settings(&config.url, config.max_connections, config.timeout_secs).await
}

pub async fn connect_with_settings(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(timeout_secs.max(1)))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
                sqlx::query("PRAGMA busy_timeout = 5000").execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use prodcat_core::config::AppConfig;

    use super::{connect_with_config, connect_with_settings};

    #[tokio::test]
    async fn zero_pool_settings_are_clamped() {
        let pool = connect_with_settings("sqlite::memory:", 0, 0).await.expect("connect");

        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await.expect("ping");

        assert_eq!(one, 1);
        assert_eq!(pool.options().get_max_connections(), 1);
    }

    #[tokio::test]
    async fn connects_from_database_config() {
        let mut config = AppConfig::default().database;
        config.url = "sqlite::memory:".to_string();
        config.max_connections = 2;

        let pool = connect_with_config(&config).await.expect("connect");

        assert_eq!(pool.options().get_max_connections(), 2);
    }
}
