use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::repositories::CategoryRepository;

/// Service for category operations
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

fn not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.categories.list_active().await?;
        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all active categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.categories.list_active().await?;
        Ok(CategoryTreeDto::build_tree(categories))
    }

    /// Get an active category by id
    pub async fn get_by_id(&self, id: i32) -> Result<CategoryResponseDto> {
        self.categories
            .find_by_id(id)
            .await?
            .filter(|c| c.is_active)
            .map(|c| c.into())
            .ok_or_else(not_found)
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        if let Some(parent_id) = dto.parent_id {
            self.ensure_parent_exists(parent_id).await?;
        }

        let category = self.categories.insert(dto.into()).await?;
        tracing::info!("Created category {} ({})", category.id, category.name);
        Ok(category.into())
    }

    /// Merge the provided fields into an existing category.
    ///
    /// Only direct self-parenting is rejected; longer cycles are not detected.
    pub async fn update(&self, id: i32, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        self.categories.find_by_id(id).await?.ok_or_else(not_found)?;

        if let Some(Some(parent_id)) = dto.parent_id {
            self.ensure_parent_exists(parent_id).await?;
            if parent_id == id {
                return Err(AppError::BadRequest(
                    "Category cannot be its own parent".to_string(),
                ));
            }
        }

        let category = self
            .categories
            .update(id, dto.into())
            .await?
            .ok_or_else(not_found)?;
        Ok(category.into())
    }

    /// Soft delete: the row is kept with `is_active = false`
    pub async fn delete(&self, id: i32) -> Result<CategoryResponseDto> {
        let category = self
            .categories
            .set_active(id, false)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!("Deactivated category {}", id);
        Ok(category.into())
    }

    async fn ensure_parent_exists(&self, parent_id: i32) -> Result<()> {
        match self.categories.find_by_id(parent_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::BadRequest(
                "Parent category not found".to_string(),
            )),
        }
    }
}
