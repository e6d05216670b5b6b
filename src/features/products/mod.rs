//! Product catalogue.
//!
//! Reads are public. Writes require a seller access token, and a product can only be
//! changed or removed by the seller who listed it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/products` | - | Active products, paginated |
//! | GET | `/products/category/{category_id}` | - | Active products of an active category |
//! | GET | `/products/{id}` | - | Single active product |
//! | POST | `/products` | seller | List a new product |
//! | PUT | `/products/{id}` | owner | Update own product |
//! | DELETE | `/products/{id}` | owner | Soft delete own product |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProductRepository, ProductRepository};
pub use services::ProductService;
