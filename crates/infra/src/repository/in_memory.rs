use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use catalog_core::Entity;
use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError, RepositoryResult};

/// How the in-memory store hands out ids on create.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IdStrategy {
    /// Relational-like: always assign the next number ("1", "2", ...).
    Sequential,
    /// Document-like: keep an incoming id, otherwise generate a UUID v7.
    Generated,
}

/// In-memory product store.
///
/// Intended for tests/dev. Keeps insertion order so listings are stable.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    strategy: IdStrategy,
    next_id: AtomicU64,
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            next_id: AtomicU64::new(1),
            products: RwLock::new(Vec::new()),
        }
    }

    /// Stand-in for the relational primary store.
    pub fn sequential() -> Self {
        Self::new(IdStrategy::Sequential)
    }

    /// Stand-in for the document secondary store.
    pub fn generated() -> Self {
        Self::new(IdStrategy::Generated)
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn assign_id(&self, product: &mut Product) {
        match self.strategy {
            IdStrategy::Sequential => {
                product.id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
            }
            IdStrategy::Generated if !product.has_id() => {
                product.id = Uuid::now_v7().to_string();
            }
            IdStrategy::Generated => {}
        }
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::backend("lock poisoned")
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &mut Product) -> RepositoryResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned())?;

        self.assign_id(product);
        if products.iter().any(|p| p.id == product.id) {
            return Err(RepositoryError::backend(format!("duplicate product id {}", product.id)));
        }

        products.push(product.clone());
        Ok(())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.clone())
    }

    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product> {
        let products = self.products.read().map_err(|_| poisoned())?;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &str, product: &Product) -> RepositoryResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        if let Some(existing) = products.iter_mut().find(|p| p.id == id) {
            existing.name = product.name.clone();
            existing.description = product.description.clone();
            existing.price = product.price;
            existing.stock = product.stock;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        products.retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product::new("Widget", "d", 9.99, 3)
    }

    #[tokio::test]
    async fn sequential_assigns_increasing_ids_and_overrides_incoming() {
        let repo = InMemoryProductRepository::sequential();

        let mut a = widget().with_id("client-chosen");
        let mut b = widget();
        repo.create(&mut a).await.unwrap();
        repo.create(&mut b).await.unwrap();

        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn generated_keeps_incoming_id() {
        let repo = InMemoryProductRepository::generated();

        let mut p = widget().with_id("7");
        repo.create(&mut p).await.unwrap();

        assert_eq!(p.id, "7");
        assert_eq!(repo.get_by_id("7").await.unwrap(), p);
    }

    #[tokio::test]
    async fn generated_assigns_uuid_when_missing() {
        let repo = InMemoryProductRepository::generated();

        let mut p = widget();
        repo.create(&mut p).await.unwrap();

        assert!(Uuid::parse_str(&p.id).is_ok());
    }

    #[tokio::test]
    async fn generated_rejects_duplicate_ids() {
        let repo = InMemoryProductRepository::generated();

        repo.create(&mut widget().with_id("7")).await.unwrap();
        let err = repo.create(&mut widget().with_id("7")).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Backend(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let repo = InMemoryProductRepository::generated();
        for id in ["c", "a", "b"] {
            repo.create(&mut widget().with_id(id)).await.unwrap();
        }

        let ids: Vec<String> = repo.get_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let repo = InMemoryProductRepository::sequential();
        let err = repo.get_by_id("42").await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound("42".to_string()));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let repo = InMemoryProductRepository::sequential();
        let mut p = widget();
        repo.create(&mut p).await.unwrap();

        let changed = Product::new("Gadget", "updated", 15.0, 8).with_id("ignored");
        repo.update(&p.id, &changed).await.unwrap();

        let stored = repo.get_by_id(&p.id).await.unwrap();
        assert_eq!(stored, changed.with_id(p.id.clone()));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_ids_touch_nothing() {
        let repo = InMemoryProductRepository::sequential();
        repo.create(&mut widget()).await.unwrap();

        repo.update("99", &Product::new("x", "y", 1.0, 1)).await.unwrap();
        repo.delete("99").await.unwrap();

        assert_eq!(repo.get_by_id("1").await.unwrap().name, "Widget");
    }

    #[tokio::test]
    async fn delete_removes_product() {
        let repo = InMemoryProductRepository::sequential();
        let mut p = widget();
        repo.create(&mut p).await.unwrap();

        repo.delete(&p.id).await.unwrap();

        assert!(repo.is_empty());
        assert!(repo.get_by_id(&p.id).await.unwrap_err().is_not_found());
    }

    #[test]
    fn poisoned_store_still_reports_its_contents() {
        let repo = std::sync::Arc::new(InMemoryProductRepository::sequential());
        repo.products.write().unwrap().push(widget().with_id("1"));

        let writer = repo.clone();
        let _ = std::thread::spawn(move || {
            let _held = writer.products.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(repo.products.is_poisoned());
        assert_eq!(repo.len(), 1);
        assert!(!repo.is_empty());
    }
}
