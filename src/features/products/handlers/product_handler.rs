use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireSeller;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List active products
#[utoipa::path(
    get,
    path = "/products",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of active products", body = ApiResponse<Vec<ProductResponseDto>>),
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let (products, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(products),
        None,
        Some(Meta::total(total)),
    )))
}

/// List active products of an active category
#[utoipa::path(
    get,
    path = "/products/category/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Products in category", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 404, description = "Category not found or inactive")
    ),
    tag = "products"
)]
pub async fn list_products_by_category(
    State(service): State<Arc<ProductService>>,
    Path(category_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.list_by_category(category_id).await?;
    Ok(Json(ApiResponse::success(Some(products), None, None)))
}

/// Get an active product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Product category is inactive"),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

/// Create a product (sellers only)
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or category not found/inactive"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a seller")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_product(
    RequireSeller(seller): RequireSeller,
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(&seller, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created".to_string()),
            None,
        )),
    ))
}

/// Update own product (sellers only)
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error or category not found/inactive"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a seller or not the owner"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_product(
    RequireSeller(seller): RequireSeller,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i32>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate_fields()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.update(&seller, id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated".to_string()),
        None,
    )))
}

/// Soft delete own product (sellers only)
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deactivated", body = ApiResponse<ProductResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a seller or not the owner"),
        (status = 404, description = "Product not found")
    ),
    tag = "products",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_product(
    RequireSeller(seller): RequireSeller,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.delete(&seller, id).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product deleted".to_string()),
        None,
    )))
}
