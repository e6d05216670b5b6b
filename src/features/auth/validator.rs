use std::sync::Arc;

use super::model::{AuthenticatedUser, TokenKind};
use super::services::TokenService;
use crate::core::error::{AppError, Result};
use crate::features::users::repositories::UserRepository;

/// Resolves a bearer access token to a live, active user
pub struct JwtValidator {
    token_service: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl JwtValidator {
    pub fn new(token_service: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            token_service,
            users,
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.token_service.verify(token, TokenKind::Access)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".to_string()))?;

        Ok(AuthenticatedUser::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::TokenSubject;
    use crate::features::users::models::UserRole;
    use crate::features::users::repositories::memory::InMemoryUserRepository;
    use crate::shared::test_helpers::test_token_service;

    #[tokio::test]
    async fn test_validate_token_resolves_active_user() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = users.seed("buyer@example.com", "hash", UserRole::Buyer).await;
        let tokens = Arc::new(test_token_service());
        let validator = JwtValidator::new(Arc::clone(&tokens), users);

        let issued = tokens
            .create_access_token(&TokenSubject::from(&user))
            .unwrap();
        let resolved = validator.validate_token(&issued.token).await.unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.role, UserRole::Buyer);
    }

    #[tokio::test]
    async fn test_validate_token_rejects_inactive_user() {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = users.seed("gone@example.com", "hash", UserRole::Seller).await;
        users.deactivate(user.id).await;
        let tokens = Arc::new(test_token_service());
        let validator = JwtValidator::new(Arc::clone(&tokens), users);

        let issued = tokens
            .create_access_token(&TokenSubject::from(&user))
            .unwrap();

        assert!(matches!(
            validator.validate_token(&issued.token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_validate_token_rejects_unknown_user() {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(test_token_service());
        let validator = JwtValidator::new(Arc::clone(&tokens), users);

        let subject = TokenSubject {
            id: 99,
            email: "nobody@example.com".to_string(),
            role: UserRole::Buyer,
        };
        let issued = tokens.create_access_token(&subject).unwrap();

        assert!(validator.validate_token(&issued.token).await.is_err());
    }
}
