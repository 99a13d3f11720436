use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity};

/// Maximum product name length, counted in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Catalog product.
///
/// `id` is opaque: the relational store hands out sequential numbers, the
/// document store keeps whatever it receives or generates its own. An empty
/// `id` means no store has seen the product yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    /// Build a product that has not been persisted yet.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            price,
            stock,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Check the input rules, reporting the first one that fails.
    ///
    /// Order: name, description, price, stock.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.name.chars().count() > NAME_MAX_CHARS {
            return Err(DomainError::validation(format!(
                "name must be at most {NAME_MAX_CHARS} characters"
            )));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description is required"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(DomainError::validation("price must be greater than 0"));
        }
        if self.stock == 0 {
            return Err(DomainError::validation("stock is required"));
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
