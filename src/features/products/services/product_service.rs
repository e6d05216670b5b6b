use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::Product;
use crate::features::products::repositories::ProductRepository;
use crate::shared::types::PaginationQuery;

/// Service for product catalogue operations
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

fn product_not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// One page of active products plus the total count
    pub async fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<ProductResponseDto>, i64)> {
        let products = self
            .products
            .list_active(pagination.offset(), pagination.limit())
            .await?;
        let total = self.products.count_active().await?;

        Ok((products.into_iter().map(|p| p.into()).collect(), total))
    }

    pub async fn list_by_category(&self, category_id: i32) -> Result<Vec<ProductResponseDto>> {
        if !self.is_category_active(category_id).await? {
            return Err(AppError::NotFound(
                "Category not found or inactive".to_string(),
            ));
        }

        let products = self.products.list_active_by_category(category_id).await?;
        Ok(products.into_iter().map(|p| p.into()).collect())
    }

    pub async fn get(&self, id: i32) -> Result<ProductResponseDto> {
        let product = self.find_active(id).await?;

        if !self.is_category_active(product.category_id).await? {
            return Err(AppError::BadRequest("Category is inactive".to_string()));
        }

        Ok(product.into())
    }

    pub async fn create(
        &self,
        seller: &AuthenticatedUser,
        dto: CreateProductDto,
    ) -> Result<ProductResponseDto> {
        self.ensure_category_active(dto.category_id).await?;

        let product = self
            .products
            .insert(dto.into_new_product(seller.id))
            .await?;

        tracing::info!(
            "Seller {} created product {} in category {}",
            seller.id,
            product.id,
            product.category_id
        );
        Ok(product.into())
    }

    pub async fn update(
        &self,
        seller: &AuthenticatedUser,
        id: i32,
        dto: UpdateProductDto,
    ) -> Result<ProductResponseDto> {
        let product = self.find_active(id).await?;
        ensure_owner(&product, seller)?;

        if let Some(category_id) = dto.category_id {
            self.ensure_category_active(category_id).await?;
        }

        let updated = self
            .products
            .update(id, dto.into())
            .await?
            .ok_or_else(product_not_found)?;
        Ok(updated.into())
    }

    /// Soft delete: the row is kept with `is_active = false`
    pub async fn delete(&self, seller: &AuthenticatedUser, id: i32) -> Result<ProductResponseDto> {
        let product = self.find_active(id).await?;
        ensure_owner(&product, seller)?;

        let deleted = self
            .products
            .set_active(id, false)
            .await?
            .ok_or_else(product_not_found)?;

        tracing::info!("Seller {} deactivated product {}", seller.id, id);
        Ok(deleted.into())
    }

    async fn find_active(&self, id: i32) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .filter(|p| p.is_active)
            .ok_or_else(product_not_found)
    }

    async fn is_category_active(&self, category_id: i32) -> Result<bool> {
        Ok(self
            .categories
            .find_by_id(category_id)
            .await?
            .is_some_and(|c| c.is_active))
    }

    async fn ensure_category_active(&self, category_id: i32) -> Result<()> {
        if self.is_category_active(category_id).await? {
            Ok(())
        } else {
            Err(AppError::BadRequest(
                "Category not found or inactive".to_string(),
            ))
        }
    }
}

fn ensure_owner(product: &Product, user: &AuthenticatedUser) -> Result<()> {
    if product.is_owned_by(user.id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You can only modify your own products".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::repositories::memory::InMemoryCategoryRepository;
    use crate::features::products::repositories::memory::InMemoryProductRepository;
    use crate::features::users::models::UserRole;
    use rust_decimal::Decimal;

    struct Fixture {
        service: ProductService,
        categories: Arc<InMemoryCategoryRepository>,
    }

    fn fixture() -> Fixture {
        let categories = Arc::new(InMemoryCategoryRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        Fixture {
            service: ProductService::new(products, categories.clone()),
            categories,
        }
    }

    fn seller(id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            email: format!("seller{}@example.com", id),
            role: UserRole::Seller,
        }
    }

    fn create_dto(category_id: i32) -> CreateProductDto {
        CreateProductDto {
            name: "Desk lamp".to_string(),
            description: Some("Warm white LED".to_string()),
            price: Decimal::new(2450, 2),
            image_url: None,
            stock: 3,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_in_inactive_category_is_bad_request() {
        let f = fixture();
        let category = f.categories.seed("Lighting", None).await;
        f.categories.set_active(category.id, false).await.unwrap();

        let err = f
            .service
            .create(&seller(1), create_dto(category.id))
            .await
            .unwrap_err();

        assert!(
            matches!(err, AppError::BadRequest(ref msg) if msg == "Category not found or inactive")
        );
    }

    #[tokio::test]
    async fn test_create_in_missing_category_is_bad_request() {
        let f = fixture();
        let result = f.service.create(&seller(1), create_dto(77)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_assigns_seller() {
        let f = fixture();
        let category = f.categories.seed("Lighting", None).await;

        let product = f
            .service
            .create(&seller(5), create_dto(category.id))
            .await
            .unwrap();

        assert_eq!(product.seller_id, 5);
        assert_eq!(product.category_id, category.id);
        assert!(product.is_active);
    }

    #[tokio::test]
    async fn test_update_by_other_seller_is_forbidden() {
        let f = fixture();
        let category = f.categories.seed("Lighting", None).await;
        let product = f
            .service
            .create(&seller(1), create_dto(category.id))
            .await
            .unwrap();

        let err = f
            .service
            .update(
                &seller(2),
                product.id,
                UpdateProductDto {
                    stock: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = f.service.delete(&seller(2), product.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_rechecks_category() {
        let f = fixture();
        let lighting = f.categories.seed("Lighting", None).await;
        let archived = f.categories.seed("Archived", None).await;
        f.categories.set_active(archived.id, false).await.unwrap();
        let owner = seller(1);
        let product = f
            .service
            .create(&owner, create_dto(lighting.id))
            .await
            .unwrap();

        let updated = f
            .service
            .update(
                &owner,
                product.id,
                UpdateProductDto {
                    price: Some(Decimal::new(1999, 2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, Decimal::new(1999, 2));
        assert_eq!(updated.name, "Desk lamp");
        assert_eq!(updated.stock, 3);

        let err = f
            .service
            .update(
                &owner,
                product.id,
                UpdateProductDto {
                    category_id: Some(archived.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let f = fixture();
        let category = f.categories.seed("Lighting", None).await;
        let owner = seller(1);
        let product = f
            .service
            .create(&owner, create_dto(category.id))
            .await
            .unwrap();

        let deleted = f.service.delete(&owner, product.id).await.unwrap();
        assert!(!deleted.is_active);

        assert!(matches!(
            f.service.get(product.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.delete(&owner, product.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_product_in_inactive_category_is_bad_request() {
        let f = fixture();
        let category = f.categories.seed("Lighting", None).await;
        let product = f
            .service
            .create(&seller(1), create_dto(category.id))
            .await
            .unwrap();
        f.categories.set_active(category.id, false).await.unwrap();

        assert!(matches!(
            f.service.get(product.id).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            f.service.list_by_category(category.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_paginates_active_products() {
        let f = fixture();
        let category = f.categories.seed("Lighting", None).await;
        let owner = seller(1);
        for _ in 0..3 {
            f.service
                .create(&owner, create_dto(category.id))
                .await
                .unwrap();
        }
        let last = f
            .service
            .create(&owner, create_dto(category.id))
            .await
            .unwrap();
        f.service.delete(&owner, last.id).await.unwrap();

        let (page, total) = f
            .service
            .list(&PaginationQuery {
                page: 2,
                page_size: 2,
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
    }
}
