pub mod fixtures;
pub mod repositories;

pub use fixtures::seed_products;
pub use repositories::{InMemoryProductRepository, ProductRepository, RepositoryError};
