//! In-memory implementation of the persistence port
//!
//! Backs the test suite and local experimentation. Products live in a
//! `BTreeMap` keyed by identity, so iteration order matches the Postgres
//! store's `ORDER BY id_product` and stays stable across pages.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{ProductRepository, RepositoryError, RepositoryOperation, RepositoryResult};
use crate::ids::ProductId;
use crate::model::Product;

/// Product store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    items: RwLock<BTreeMap<String, Product>>,
}

impl MemoryProductRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with the given products.
    pub async fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        {
            let mut items = store.items.write().await;
            for product in products {
                items.insert(product.id.as_str().to_string(), product);
            }
        }
        store
    }

    /// Number of products currently stored.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no products.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn count_all(&self) -> RepositoryResult<u64> {
        Ok(self.items.read().await.len() as u64)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn find_page(&self, limit: u32, offset: u64) -> RepositoryResult<(Vec<Product>, u64)> {
        let items = self.items.read().await;
        let total = items.len() as u64;
        let page = items
            .values()
            .skip(offset.min(usize::MAX as u64) as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.items.read().await.get(id.as_str()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn insert(&self, product: &Product) -> RepositoryResult<()> {
        let mut items = self.items.write().await;
        let key = product.id.as_str().to_string();
        if items.contains_key(&key) {
            return Err(RepositoryError::already_exists(
                RepositoryOperation::Insert,
                "duplicate identity",
            )
            .with_context(key));
        }
        items.insert(key, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> RepositoryResult<bool> {
        let mut items = self.items.write().await;
        match items.get_mut(product.id.as_str()) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ProductId) -> RepositoryResult<bool> {
        Ok(self.items.write().await.remove(id.as_str()).is_some())
    }
}
