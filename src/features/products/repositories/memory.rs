//! In-memory product store for service and handler tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::core::error::Result;
use crate::features::products::models::{NewProduct, Product, ProductChanges};

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    next_id: AtomicI32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_active(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.is_active)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_active(&self) -> Result<i64> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| p.is_active).count() as i64)
    }

    async fn list_active_by_category(&self, category_id: i32) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.is_active && p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        let product = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: new_product.name,
            description: new_product.description,
            price: new_product.price,
            image_url: new_product.image_url,
            stock: new_product.stock,
            is_active: true,
            category_id: new_product.category_id,
            seller_id: new_product.seller_id,
        };
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(description) = changes.description {
            product.description = Some(description);
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(image_url) = changes.image_url {
            product.image_url = Some(image_url);
        }
        if let Some(stock) = changes.stock {
            product.stock = stock;
        }
        if let Some(category_id) = changes.category_id {
            product.category_id = category_id;
        }
        Ok(Some(product.clone()))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| p.id == id).map(|p| {
            p.is_active = is_active;
            p.clone()
        }))
    }
}
