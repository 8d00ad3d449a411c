use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use shelf_store::ProductRepository;

#[derive(Clone)]
pub struct HealthState {
    repository: Arc<dyn ProductRepository>,
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
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(repository: Arc<dyn ProductRepository>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { repository })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(state.repository.as_ref()).await;
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "shelf-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn catalog_check(repository: &dyn ProductRepository) -> HealthCheck {
    match repository.count().await {
        Ok(count) => {
            HealthCheck { status: "ready", detail: format!("{count} products in catalog") }
        }
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("catalog read failed: {error}") }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use shelf_store::InMemoryProductRepository;

    use crate::health::{health, HealthState};

    #[tokio::test]
    async fn health_reports_seeded_catalog_size() {
        let repository = Arc::new(InMemoryProductRepository::seeded());

        let (status, Json(payload)) = health(State(HealthState { repository })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.service.status, "ready");
        assert_eq!(payload.catalog.status, "ready");
        assert_eq!(payload.catalog.detail, "3 products in catalog");
    }

    #[tokio::test]
    async fn health_is_ready_for_an_empty_catalog() {
        let repository = Arc::new(InMemoryProductRepository::default());

        let (status, Json(payload)) = health(State(HealthState { repository })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.catalog.detail, "0 products in catalog");
    }
}
