//! Dual-store coordination (application-level orchestration).
//!
//! Every product mutation goes to two independent stores: the relational
//! **primary** and the document **secondary**. This module owns the ordering,
//! fallback and partial-failure policy across them.
//!
//! ```text
//! create / update / delete          get_product_by_id        get_all_products
//!   ↓                                 ↓                        ↓
//! primary ──err──> fail           primary ──ok──> done     primary ──err──> fail
//!   ↓ ok                              ↓ any err                ↓ ok
//! secondary ──> final result      secondary ──> final      secondary ──err──> fail
//!                                                              ↓ ok
//!                                                          primary ++ secondary
//! ```
//!
//! ## Policy
//!
//! - Writes are **best-effort dual-writes**: the secondary is attempted if and
//!   only if the primary succeeded. There is no rollback or compensation, so a
//!   secondary failure after a primary success leaves the stores diverged and
//!   is reported as the operation's error.
//! - Single reads fall back to the secondary on **any** primary error. A
//!   primary "not found" and a primary outage look the same here.
//! - Listings concatenate primary then secondary with no de-duplication.
//! - The two store calls of one operation are always sequential. Nothing is
//!   retried.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use catalog_products::Product;

use crate::repository::{ProductRepository, RepositoryError};

/// Which side of the dual write a store plays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreRole {
    Primary,
    Secondary,
}

impl StoreRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for StoreRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinator operation, carried in errors and logs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinatorError {
    /// A store handle was absent at construction.
    #[error("{0} repository is required")]
    MissingRepository(StoreRole),

    /// The primary store failed; for writes the secondary was not attempted.
    #[error("primary store {op} failed: {source}")]
    Primary {
        op: Operation,
        #[source]
        source: RepositoryError,
    },

    /// The secondary store failed. For writes the primary already committed.
    #[error("secondary store {op} failed: {source}")]
    Secondary {
        op: Operation,
        #[source]
        source: RepositoryError,
    },
}

impl CoordinatorError {
    fn primary(op: Operation, source: RepositoryError) -> Self {
        Self::Primary { op, source }
    }

    fn secondary(op: Operation, source: RepositoryError) -> Self {
        Self::Secondary { op, source }
    }

    /// The store error behind this failure, if a store produced it.
    pub fn repository_error(&self) -> Option<&RepositoryError> {
        match self {
            Self::Primary { source, .. } | Self::Secondary { source, .. } => Some(source),
            Self::MissingRepository(_) => None,
        }
    }

    pub fn role(&self) -> StoreRole {
        match self {
            Self::MissingRepository(role) => *role,
            Self::Primary { .. } => StoreRole::Primary,
            Self::Secondary { .. } => StoreRole::Secondary,
        }
    }

    /// True when the store that produced the final error reported absence.
    pub fn is_not_found(&self) -> bool {
        self.repository_error().is_some_and(RepositoryError::is_not_found)
    }
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Single product API over a primary and a secondary store.
///
/// Holds only the two shared repository handles, which are set once here and
/// never reassigned, so one coordinator can serve concurrent requests.
#[derive(Clone)]
pub struct DualStoreCoordinator {
    primary: Arc<dyn ProductRepository>,
    secondary: Arc<dyn ProductRepository>,
}

impl fmt::Debug for DualStoreCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualStoreCoordinator").finish_non_exhaustive()
    }
}

impl DualStoreCoordinator {
    pub fn new(primary: Arc<dyn ProductRepository>, secondary: Arc<dyn ProductRepository>) -> Self {
        Self { primary, secondary }
    }

    /// Build from optionally-present handles, as produced by config-driven wiring.
    pub fn from_parts(
        primary: Option<Arc<dyn ProductRepository>>,
        secondary: Option<Arc<dyn ProductRepository>>,
    ) -> CoordinatorResult<Self> {
        let primary = primary.ok_or(CoordinatorError::MissingRepository(StoreRole::Primary))?;
        let secondary = secondary.ok_or(CoordinatorError::MissingRepository(StoreRole::Secondary))?;
        Ok(Self::new(primary, secondary))
    }

    /// Write to primary, then (only if that took) to secondary.
    ///
    /// On success `product.id` holds the primary-assigned id, which is also
    /// what the secondary received.
    #[instrument(skip(self, product), err)]
    pub async fn create_product(&self, product: &mut Product) -> CoordinatorResult<()> {
        self.primary
            .create(product)
            .await
            .map_err(|e| CoordinatorError::primary(Operation::Create, e))?;

        self.secondary.create(product).await.map_err(|e| {
            tracing::warn!(
                product_id = %product.id,
                error = %e,
                "secondary create failed after primary commit; stores diverged"
            );
            CoordinatorError::secondary(Operation::Create, e)
        })
    }

    /// Primary listing followed by secondary listing; either failure fails the call.
    #[instrument(skip(self), err)]
    pub async fn get_all_products(&self) -> CoordinatorResult<Vec<Product>> {
        let mut products = self.list_primary().await?;
        let secondary = self.list_secondary().await?;
        products.extend(secondary);
        Ok(products)
    }

    /// Primary lookup, falling back to secondary on any primary error.
    #[instrument(skip(self), err(level = "debug"))]
    pub async fn get_product_by_id(&self, id: &str) -> CoordinatorResult<Product> {
        match self.primary.get_by_id(id).await {
            Ok(product) => Ok(product),
            Err(primary_err) => {
                tracing::warn!(
                    product_id = %id,
                    error = %primary_err,
                    "primary lookup failed; falling back to secondary"
                );
                self.secondary
                    .get_by_id(id)
                    .await
                    .map_err(|e| CoordinatorError::secondary(Operation::Get, e))
            }
        }
    }

    #[instrument(skip(self, product), err)]
    pub async fn update_product(&self, id: &str, product: &Product) -> CoordinatorResult<()> {
        self.primary
            .update(id, product)
            .await
            .map_err(|e| CoordinatorError::primary(Operation::Update, e))?;

        self.secondary.update(id, product).await.map_err(|e| {
            tracing::warn!(
                product_id = %id,
                error = %e,
                "secondary update failed after primary commit; stores diverged"
            );
            CoordinatorError::secondary(Operation::Update, e)
        })
    }

    #[instrument(skip(self), err)]
    pub async fn delete_product(&self, id: &str) -> CoordinatorResult<()> {
        self.primary
            .delete(id)
            .await
            .map_err(|e| CoordinatorError::primary(Operation::Delete, e))?;

        self.secondary.delete(id).await.map_err(|e| {
            tracing::warn!(
                product_id = %id,
                error = %e,
                "secondary delete failed after primary commit; stores diverged"
            );
            CoordinatorError::secondary(Operation::Delete, e)
        })
    }

    /// Primary store contents only.
    pub async fn list_primary(&self) -> CoordinatorResult<Vec<Product>> {
        self.primary
            .get_all()
            .await
            .map_err(|e| CoordinatorError::primary(Operation::List, e))
    }

    /// Secondary store contents only.
    pub async fn list_secondary(&self) -> CoordinatorResult<Vec<Product>> {
        self.secondary
            .get_all()
            .await
            .map_err(|e| CoordinatorError::secondary(Operation::List, e))
    }
}
