use async_trait::async_trait;
use sqlx::PgPool;

use super::ProductRepository;
use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::products::models::{NewProduct, Product, ProductChanges};

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_active(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_url, stock, is_active, category_id, seller_id
            FROM products
            WHERE is_active = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn count_active(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count products: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_active_by_category(&self, category_id: i32) -> Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_url, stock, is_active, category_id, seller_id
            FROM products
            WHERE category_id = $1 AND is_active = TRUE
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products of category {}: {:?}", category_id, e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_url, stock, is_active, category_id, seller_id
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product by id: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, image_url, stock, category_id, seller_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, image_url, stock, is_active, category_id, seller_id
            "#,
        )
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(&new_product.image_url)
        .bind(new_product.stock)
        .bind(new_product.category_id)
        .bind(new_product.seller_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Product already exists"))
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image_url = COALESCE($5, image_url),
                stock = COALESCE($6, stock),
                category_id = COALESCE($7, category_id)
            WHERE id = $1
            RETURNING id, name, description, price, image_url, stock, is_active, category_id, seller_id
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.price)
        .bind(changes.image_url)
        .bind(changes.stock)
        .bind(changes.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| handle_db_error(e, "Product already exists"))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET is_active = $2
            WHERE id = $1
            RETURNING id, name, description, price, image_url, stock, is_active, category_id, seller_id
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set product {} active={}: {:?}", id, is_active, e);
            AppError::Database(e)
        })
    }
}
