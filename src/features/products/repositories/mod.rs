mod product_repository;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::products::models::{NewProduct, Product, ProductChanges};

pub use product_repository::PgProductRepository;

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// One page of active products ordered by id
    async fn list_active(&self, offset: i64, limit: i64) -> Result<Vec<Product>>;
    async fn count_active(&self) -> Result<i64>;
    async fn list_active_by_category(&self, category_id: i32) -> Result<Vec<Product>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;
    async fn insert(&self, new_product: NewProduct) -> Result<Product>;
    async fn update(&self, id: i32, changes: ProductChanges) -> Result<Option<Product>>;
    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Product>>;
}
