//! Accounts and token issuance.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/users` | Register a buyer or seller |
//! | POST | `/users/token` | Password login (form), returns access + refresh tokens |
//! | POST | `/users/refresh-token` | Exchange a refresh token for a new access token |
//! | GET | `/users/me` | Current account (bearer) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgUserRepository, UserRepository};
pub use services::UserService;
