//! Service wiring and the API router shared by `main` and the HTTP tests.

use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
use sqlx::PgPool;

use crate::core::middleware;
use crate::features::auth::services::TokenService;
use crate::features::auth::JwtValidator;
use crate::features::categories::{
    routes as categories_routes, CategoryRepository, CategoryService, PgCategoryRepository,
};
use crate::features::products::{
    routes as products_routes, PgProductRepository, ProductRepository, ProductService,
};
use crate::features::users::{
    routes as users_routes, PgUserRepository, UserRepository, UserService,
};

/// Storage backends behind the services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool)),
        }
    }
}

pub struct AppServices {
    pub users: Arc<UserService>,
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
    pub jwt_validator: Arc<JwtValidator>,
}

impl AppServices {
    pub fn new(repos: Repositories, token_service: Arc<TokenService>) -> Self {
        Self {
            users: Arc::new(UserService::new(
                Arc::clone(&repos.users),
                Arc::clone(&token_service),
            )),
            categories: Arc::new(CategoryService::new(Arc::clone(&repos.categories))),
            products: Arc::new(ProductService::new(
                Arc::clone(&repos.products),
                Arc::clone(&repos.categories),
            )),
            jwt_validator: Arc::new(JwtValidator::new(token_service, repos.users)),
        }
    }
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All API routes, without docs or the outer HTTP layers
pub fn api_router(services: &AppServices) -> Router {
    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(users_routes::protected_routes(Arc::clone(&services.users)))
        .merge(products_routes::protected_routes(Arc::clone(
            &services.products,
        )))
        .route_layer(from_fn_with_state(
            Arc::clone(&services.jwt_validator),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(users_routes::public_routes(Arc::clone(&services.users)))
        .merge(categories_routes::routes(Arc::clone(&services.categories)))
        .merge(products_routes::public_routes(Arc::clone(
            &services.products,
        )));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .route("/health", get(health_check))
}
