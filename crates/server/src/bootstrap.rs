use std::sync::Arc;

use axum::Router;
use shelf_core::config::{AppConfig, ConfigError, LoadOptions};
use shelf_store::{seed_products, InMemoryProductRepository, ProductRepository, RepositoryError};
use thiserror::Error;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::{health, products};

pub struct Application {
    pub config: AppConfig,
    pub repository: Arc<dyn ProductRepository>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog seeding failed: {0}")]
    Seed(#[source] RepositoryError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let repository = Arc::new(InMemoryProductRepository::default());
    if config.catalog.seed_on_startup {
        repository.reset(seed_products()).await.map_err(BootstrapError::Seed)?;
    }

    let product_count = repository.count().await.map_err(BootstrapError::Seed)?;
    info!(
        event_name = "system.bootstrap.catalog_ready",
        correlation_id = "bootstrap",
        seeded = config.catalog.seed_on_startup,
        product_count,
        "product catalog initialized"
    );

    Ok(Application { config, repository })
}

impl Application {
    pub fn router(&self) -> Router {
        products::router(self.repository.clone())
            .merge(health::router(self.repository.clone()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use shelf_core::config::{ConfigOverrides, LoadOptions};
    use tower::ServiceExt;

    use crate::bootstrap::{bootstrap, BootstrapError};

    fn options(seed_on_startup: bool) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                seed_on_startup: Some(seed_on_startup),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_seeds_catalog_by_default() {
        let app = bootstrap(options(true)).await.expect("bootstrap should succeed");

        assert_eq!(app.repository.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn bootstrap_can_start_with_an_empty_catalog() {
        let app = bootstrap(options(false)).await.expect("bootstrap should succeed");

        assert_eq!(app.repository.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_on_invalid_config() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides { port: Some(0), ..ConfigOverrides::default() },
            ..LoadOptions::default()
        })
        .await;

        let error = result.err().expect("error");
        assert!(matches!(error, BootstrapError::Config(_)));
        assert!(error.to_string().contains("server.port"));
    }

    #[tokio::test]
    async fn application_router_serves_products_and_health() {
        let app = bootstrap(options(true)).await.expect("bootstrap should succeed");
        let router = app.router();

        for uri in ["/api/product", "/api/product/1", "/health"] {
            let response = router
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).expect("request should build"))
                .await
                .expect("router is infallible");
            assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        }
    }
}
