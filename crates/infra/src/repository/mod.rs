//! Product store boundary.
//!
//! One capability trait, several backends: Postgres (relational primary),
//! MongoDB (document secondary) and an in-memory store for dev and tests.

pub mod in_memory;
pub mod mongo;
pub mod postgres;
pub mod r#trait;

pub use in_memory::{IdStrategy, InMemoryProductRepository};
pub use mongo::{MongoProductRepository, ProductDocument};
pub use postgres::PostgresProductRepository;
pub use r#trait::{ProductRepository, RepositoryError, RepositoryResult};

#[cfg(any(test, feature = "mock"))]
pub use r#trait::MockProductRepository;
