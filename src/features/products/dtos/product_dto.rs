use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::features::products::models::{NewProduct, Product, ProductChanges};

/// Smallest price that survives rounding to cents
const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// NUMERIC(10,2) upper bound, 99999999.99 (mantissa 9_999_999_999 split into lo/mid words)
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Checks the price as it will be stored, i.e. rounded to cents
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let stored = price.round_dp(2);
    if stored < MIN_PRICE {
        return Err(ValidationError::new("price_not_positive")
            .with_message("Price must be at least 0.01".into()));
    }
    if stored > MAX_PRICE {
        return Err(ValidationError::new("price_too_large")
            .with_message("Price must be at most 99999999.99".into()));
    }
    Ok(())
}

/// Request DTO for creating a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(length(max = 200, message = "Image URL must be at most 200 characters"))]
    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub category_id: i32,
}

impl CreateProductDto {
    pub fn into_new_product(self, seller_id: i32) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price.round_dp(2),
            image_url: self.image_url,
            stock: self.stock,
            category_id: self.category_id,
            seller_id,
        }
    }
}

/// Request DTO for updating a product. Omitted or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    /// Checked by [`UpdateProductDto::validate_fields`]
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    #[validate(length(max = 200, message = "Image URL must be at most 200 characters"))]
    pub image_url: Option<String>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    pub category_id: Option<i32>,
}

impl UpdateProductDto {
    /// Derived rules plus the price check, which only applies when a price is sent
    pub fn validate_fields(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Some(price) = &self.price {
            if let Err(e) = validate_price(price) {
                errors.add("price", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<UpdateProductDto> for ProductChanges {
    fn from(dto: UpdateProductDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            price: dto.price.map(|p| p.round_dp(2)),
            image_url: dto.image_url,
            stock: dto.stock,
            category_id: dto.category_id,
        }
    }
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub stock: i32,
    pub category_id: i32,
    pub seller_id: i32,
    pub is_active: bool,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            image_url: p.image_url,
            stock: p.stock,
            category_id: p.category_id,
            seller_id: p.seller_id,
            is_active: p.is_active,
        }
    }
}
