use async_trait::async_trait;
use thiserror::Error;

use catalog_products::Product;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Product store operation error.
///
/// These are **infrastructure errors** as opposed to domain validation errors.
/// `NotFound` is the only absence signal a store gives; callers above the
/// coordinator rebuild 404 semantics from it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("product {0} not found")]
    NotFound(String),

    /// The id can never exist under this store's id scheme.
    #[error("invalid product id: {0}")]
    InvalidId(String),

    /// Driver, connection or (de)serialization failure.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// True when the store reports the product absent (including ids it cannot hold).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidId(_))
    }
}

/// Basic key/row persistence for products.
///
/// Every backend (relational, document, in-memory) implements exactly this
/// capability set. Implementations must be internally safe for concurrent
/// use; the coordinator holds them behind shared references and never locks.
///
/// `update` and `delete` follow driver semantics: touching zero rows is not an
/// error.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product. Stores that assign ids write them back into `product.id`.
    async fn create(&self, product: &mut Product) -> RepositoryResult<()>;

    /// Every product in the store, in the store's own order.
    async fn get_all(&self) -> RepositoryResult<Vec<Product>>;

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product>;

    async fn update(&self, id: &str, product: &Product) -> RepositoryResult<()>;

    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

