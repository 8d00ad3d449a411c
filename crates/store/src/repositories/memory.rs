use std::collections::HashSet;

use tokio::sync::RwLock;

use shelf_core::domain::product::{Product, ProductDraft, ProductId};

use super::{ProductRepository, RepositoryError};
use crate::fixtures::seed_products;

/// Process-local product collection guarded by a single lock.
///
/// Every mutation holds the write guard for its whole read-modify-write, so two
/// concurrent creates can never compute the same id.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Result<Self, RepositoryError> {
        ensure_unique_ids(&products)?;
        Ok(Self { products: RwLock::new(products) })
    }

    pub fn seeded() -> Self {
        Self { products: RwLock::new(seed_products()) }
    }
}

fn next_id(products: &[Product]) -> Result<ProductId, RepositoryError> {
    match products.iter().map(|product| product.id).max() {
        None => Ok(ProductId::FIRST),
        Some(max) => max.next().ok_or(RepositoryError::IdSpaceExhausted(max)),
    }
}

fn position(products: &[Product], id: ProductId) -> Result<usize, RepositoryError> {
    products.iter().position(|product| product.id == id).ok_or(RepositoryError::NotFound(id))
}

fn ensure_unique_ids(products: &[Product]) -> Result<(), RepositoryError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(RepositoryError::DuplicateId(product.id));
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.len())
    }

    async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let products = self.products.read().await;
        let index = position(&products, id)?;
        Ok(products[index].clone())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;
        let product = draft.into_product(next_id(&products)?);
        products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let index = position(&products, id)?;
        products[index].apply(draft);
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let index = position(&products, id)?;
        products.remove(index);
        Ok(())
    }

    async fn reset(&self, seed: Vec<Product>) -> Result<(), RepositoryError> {
        ensure_unique_ids(&seed)?;
        let mut products = self.products.write().await;
        *products = seed;
        Ok(())
    }
}
