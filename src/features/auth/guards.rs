//! Role-based authorization guards.
//!
//! Guards read the [`AuthenticatedUser`] placed in request extensions by the bearer
//! middleware and reject callers lacking the required role.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for seller-only operations (product management).
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireSeller(user): RequireSeller) { ... }
/// ```
pub struct RequireSeller(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        if !user.is_seller() {
            return Err(AppError::Forbidden(
                "Only sellers can perform this action".to_string(),
            ));
        }

        Ok(RequireSeller(user.clone()))
    }
}
