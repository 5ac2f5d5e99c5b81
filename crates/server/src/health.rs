use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use prodcat_core::CategoryCatalog;
use prodcat_db::DbPool;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
    catalog: Arc<dyn CategoryCatalog>,
}

impl HealthState {
    pub fn new(db_pool: DbPool, catalog: Arc<dyn CategoryCatalog>) -> Self {
        Self { db_pool, catalog }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub database: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = database_check(&state.db_pool).await;
    let catalog = catalog_check(state.catalog.as_ref());
    let ready = database.status == "ready" && catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "prodcat-server runtime initialized".to_string(),
        },
        database,
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn database_check(pool: &DbPool) -> HealthCheck {
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM product").fetch_one(pool).await {
        Ok(count) => HealthCheck { status: "ready", detail: format!("{count} products stored") },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("database query failed: {error}") }
        }
    }
}

fn catalog_check(catalog: &dyn CategoryCatalog) -> HealthCheck {
    match catalog.categories().len() {
        0 => HealthCheck { status: "degraded", detail: "category catalog is empty".to_string() },
        count => HealthCheck { status: "ready", detail: format!("{count} categories loaded") },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use prodcat_core::StaticCategoryCatalog;
    use prodcat_db::{connect_with_settings, migrations, DbPool};

    use crate::health::{health, HealthState};

    async fn migrated_pool() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("pool should connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn health_returns_ready_when_database_is_reachable() {
        let pool = migrated_pool().await;
        let state = HealthState::new(pool.clone(), Arc::new(StaticCategoryCatalog::reference()));

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.database.detail, "0 products stored");
        assert_eq!(payload.catalog.detail, "4 categories loaded");

        pool.close().await;
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_when_database_is_unavailable() {
        let pool = migrated_pool().await;
        pool.close().await;
        let state = HealthState::new(pool, Arc::new(StaticCategoryCatalog::reference()));

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.database.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }

    #[tokio::test]
    async fn empty_catalog_degrades_readiness() {
        let pool = migrated_pool().await;
        let state = HealthState::new(pool, Arc::new(StaticCategoryCatalog::new(Vec::new())));

        let (status, Json(payload)) = health(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.catalog.status, "degraded");
    }
}
