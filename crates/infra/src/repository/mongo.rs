//! MongoDB-backed product store (the document secondary).
//!
//! Documents are keyed by a string `_id`. A product that arrives with an id
//! (normally the one the primary store just assigned) keeps it, so the same
//! id addresses the product in both stores. Products without an id get a
//! fresh ObjectId in hex form.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use catalog_core::Entity;
use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError, RepositoryResult};

/// Stored document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl From<&Product> for ProductDocument {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            stock: p.stock,
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(d: ProductDocument) -> Self {
        Product {
            id: d.id,
            name: d.name,
            description: d.description,
            price: d.price,
            stock: d.stock,
        }
    }
}

/// MongoDB product store.
///
/// `Collection` is a cheap handle over the client's connection pool and is
/// safe to share across tasks.
#[derive(Debug, Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(collection: Collection<ProductDocument>) -> Self {
        Self { collection }
    }

    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        Self::new(client.database(database).collection(collection))
    }
}

fn map_mongo_error(operation: &str, err: mongodb::error::Error) -> RepositoryError {
    RepositoryError::backend(format!("mongodb error in {operation}: {err}"))
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(store = "mongodb"), err)]
    async fn create(&self, product: &mut Product) -> RepositoryResult<()> {
        if !product.has_id() {
            product.id = ObjectId::new().to_hex();
        }

        self.collection
            .insert_one(ProductDocument::from(&*product))
            .await
            .map_err(|e| map_mongo_error("create", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(store = "mongodb"), err)]
    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| map_mongo_error("get_all", e))?;

        let mut products = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| map_mongo_error("get_all", e))?
        {
            let document = cursor
                .deserialize_current()
                .map_err(|e| map_mongo_error("get_all", e))?;
            products.push(document.into());
        }
        Ok(products)
    }

    #[instrument(skip(self), fields(store = "mongodb"), err(level = "debug"))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| map_mongo_error("get_by_id", e))?
            .map(Product::from)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, product), fields(store = "mongodb"), err)]
    async fn update(&self, id: &str, product: &Product) -> RepositoryResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "name": product.name.as_str(),
                        "description": product.description.as_str(),
                        "price": product.price,
                        "stock": product.stock,
                    }
                },
            )
            .await
            .map_err(|e| map_mongo_error("update", e))?;

        tracing::debug!(matched = result.matched_count, "product document updated");
        Ok(())
    }

    #[instrument(skip(self), fields(store = "mongodb"), err)]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| map_mongo_error("delete", e))?;

        tracing::debug!(deleted = result.deleted_count, "product document deleted");
        Ok(())
    }
}
