//! Product collection routes.
//!
//! - `GET    /api/product`       — list every product
//! - `GET    /api/product/{id}`  — fetch one product
//! - `POST   /api/product`       — create a product, id assigned by the collection
//! - `PUT    /api/product/{id}`  — replace name and price
//! - `DELETE /api/product/{id}`  — remove a product

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use shelf_core::domain::product::{Product, ProductDraft, ProductId};
use shelf_core::errors::{ApplicationError, DomainError, InterfaceError};
use shelf_store::{ProductRepository, RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

pub const PRODUCTS_PATH: &str = "/api/product";

#[derive(Clone)]
pub struct ProductState {
    repository: Arc<dyn ProductRepository>,
}

impl ProductState {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub correlation_id: String,
}

/// Interface error rendered for HTTP callers. Missing products answer with a
/// bare 404.
#[derive(Debug)]
pub struct ApiError(pub InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
            ref internal @ InterfaceError::Internal { .. } => {
                let body = ErrorBody {
                    error: internal.user_message(),
                    correlation_id: internal.correlation_id().to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

fn map_repository_error(error: RepositoryError, correlation_id: &str) -> ApiError {
    let mapped = ApplicationError::from(DomainError::from(error)).into_interface(correlation_id);
    if let InterfaceError::Internal { message, .. } = &mapped {
        error!(
            event_name = "catalog.product.error",
            correlation_id = %correlation_id,
            error = %message,
            "product collection operation failed"
        );
    }
    ApiError(mapped)
}

fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn product_location(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{id}")
}

pub fn router(repository: Arc<dyn ProductRepository>) -> Router {
    Router::new()
        .route(PRODUCTS_PATH, get(list_products).post(create_product))
        .route("/api/product/{id}", get(get_product).put(update_product).delete(delete_product))
        .with_state(ProductState::new(repository))
}

pub async fn list_products(
    State(state): State<ProductState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let correlation_id = correlation_id();
    let products = state
        .repository
        .list()
        .await
        .map_err(|error| map_repository_error(error, &correlation_id))?;
    Ok(Json(products))
}

pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<ProductState>,
) -> Result<Json<Product>, ApiError> {
    let correlation_id = correlation_id();
    let product = state
        .repository
        .get(ProductId(id))
        .await
        .map_err(|error| map_repository_error(error, &correlation_id))?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<ProductState>,
    Json(draft): Json<ProductDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let correlation_id = correlation_id();
    let product = state
        .repository
        .create(draft)
        .await
        .map_err(|error| map_repository_error(error, &correlation_id))?;

    info!(
        event_name = "catalog.product.created",
        correlation_id = %correlation_id,
        product_id = product.id.0,
        "product created"
    );

    let location = product_location(product.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(product)))
}

pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<ProductState>,
    Json(draft): Json<ProductDraft>,
) -> Result<StatusCode, ApiError> {
    let correlation_id = correlation_id();
    state
        .repository
        .update(ProductId(id), draft)
        .await
        .map_err(|error| map_repository_error(error, &correlation_id))?;

    info!(
        event_name = "catalog.product.updated",
        correlation_id = %correlation_id,
        product_id = id,
        "product updated"
    );
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<ProductState>,
) -> Result<StatusCode, ApiError> {
    let correlation_id = correlation_id();
    state
        .repository
        .delete(ProductId(id))
        .await
        .map_err(|error| map_repository_error(error, &correlation_id))?;

    info!(
        event_name = "catalog.product.deleted",
        correlation_id = %correlation_id,
        product_id = id,
        "product deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
