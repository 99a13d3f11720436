//! Products domain module.
//!
//! The catalog entity and its input rules. No IO, no HTTP, no storage: the
//! stores and the dual-write policy live in `catalog-infra`.

pub mod product;

pub use product::{Product, NAME_MAX_CHARS};
