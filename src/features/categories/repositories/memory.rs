//! In-memory category store for service and handler tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use super::CategoryRepository;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
    next_id: AtomicI32,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, name: &str, parent_id: Option<i32>) -> Category {
        self.insert(NewCategory {
            name: name.to_string(),
            parent_id,
        })
        .await
        .expect("seed category")
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list_active(&self) -> Result<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().filter(|c| c.is_active).cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        let mut categories = self.categories.write().await;

        // mirror the foreign key
        if let Some(parent_id) = new_category.parent_id {
            if !categories.iter().any(|c| c.id == parent_id) {
                return Err(AppError::BadRequest(
                    "Referenced record does not exist".to_string(),
                ));
            }
        }

        let category = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: new_category.name,
            parent_id: new_category.parent_id,
            is_active: true,
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<Option<Category>> {
        let mut categories = self.categories.write().await;
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            category.name = name;
        }
        if let Some(parent_id) = changes.parent_id {
            category.parent_id = parent_id;
        }
        Ok(Some(category.clone()))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Category>> {
        let mut categories = self.categories.write().await;
        Ok(categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.is_active = is_active;
            c.clone()
        }))
    }
}
