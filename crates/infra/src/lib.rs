//! Infrastructure layer: product stores and the dual-store coordinator.

pub mod coordinator;
pub mod repository;

#[cfg(test)]
mod log_capture;

pub use coordinator::{CoordinatorError, CoordinatorResult, DualStoreCoordinator, Operation, StoreRole};
