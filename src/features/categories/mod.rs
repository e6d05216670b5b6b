//! Category hierarchy.
//!
//! Categories form a tree through `parent_id`. Deletion is soft: the row stays and
//! `is_active` flips to false, hiding it from the public listings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories` | Active categories (`?tree=true` for nested) |
//! | GET | `/categories/{id}` | Single active category |
//! | POST | `/categories` | Create a category |
//! | PUT | `/categories/{id}` | Update name and/or parent |
//! | DELETE | `/categories/{id}` | Soft delete |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
