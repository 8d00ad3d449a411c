use async_trait::async_trait;
use thiserror::Error;

use shelf_core::domain::product::{Product, ProductDraft, ProductId};
use shelf_core::errors::DomainError;

pub mod memory;

pub use memory::InMemoryProductRepository;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("product `{0}` was not found")]
    NotFound(ProductId),
    #[error("seed contains product id `{0}` more than once")]
    DuplicateId(ProductId),
    #[error("no product id is left after `{0}`")]
    IdSpaceExhausted(ProductId),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<RepositoryError> for DomainError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound(id) => DomainError::ProductNotFound(id),
            error @ (RepositoryError::DuplicateId(_) | RepositoryError::IdSpaceExhausted(_)) => {
                DomainError::InvariantViolation(error.to_string())
            }
        }
    }
}

/// The authoritative product collection.
///
/// Identifiers are owned by the repository: `create` assigns
/// `max(existing ids) + 1`, or `1` when the collection is empty, and no other
/// operation ever changes an id. `list` preserves insertion order.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    async fn get(&self, id: ProductId) -> Result<Product, RepositoryError>;

    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<(), RepositoryError>;

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Replaces the whole collection. Rejects a seed with repeated ids and
    /// leaves the current contents untouched in that case.
    async fn reset(&self, seed: Vec<Product>) -> Result<(), RepositoryError>;
}
