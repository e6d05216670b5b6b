use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for product
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    pub category_id: i32,
    pub seller_id: i32,
}

impl Product {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.seller_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub stock: i32,
    pub category_id: i32,
    pub seller_id: i32,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
}
