mod category_repository;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};

pub use category_repository::PgCategoryRepository;

#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Active categories ordered by id
    async fn list_active(&self) -> Result<Vec<Category>>;
    /// Any category, active or not
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>>;
    async fn insert(&self, new_category: NewCategory) -> Result<Category>;
    /// Returns `None` when no row has this id
    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<Option<Category>>;
    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Category>>;
}
