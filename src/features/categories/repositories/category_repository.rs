use async_trait::async_trait;
use sqlx::PgPool;

use super::CategoryRepository;
use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::models::{Category, CategoryChanges, NewCategory};

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_active(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, parent_id, is_active
            FROM categories
            WHERE is_active = TRUE
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, parent_id, is_active
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id)
            VALUES ($1, $2)
            RETURNING id, name, parent_id, is_active
            "#,
        )
        .bind(&new_category.name)
        .bind(new_category.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Category already exists"))
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<Option<Category>> {
        // $3 says whether parent_id was supplied at all, so NULL can detach
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                parent_id = CASE WHEN $3 THEN $4 ELSE parent_id END
            WHERE id = $1
            RETURNING id, name, parent_id, is_active
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.parent_id.is_some())
        .bind(changes.parent_id.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Category already exists"))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET is_active = $2
            WHERE id = $1
            RETURNING id, name, parent_id, is_active
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set category {} active={}: {:?}", id, is_active, e);
            AppError::Database(e)
        })
    }
}
