use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Catalogue reads (no authentication required)
pub fn public_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/products", get(handlers::list_products))
        .route(
            "/products/category/{category_id}",
            get(handlers::list_products_by_category),
        )
        .route("/products/{id}", get(handlers::get_product))
        .with_state(service)
}

/// Catalogue writes (require a bearer access token, seller role checked per handler)
pub fn protected_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/products", post(handlers::create_product))
        .route(
            "/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .with_state(service)
}
