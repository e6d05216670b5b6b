use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, TokenKind, TokenSubject};
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::auth::services::TokenService;
use crate::features::users::dtos::{
    AccessTokenDto, LoginRequestDto, RefreshTokenRequestDto, RegisterUserDto, TokenPairDto,
    UserResponseDto,
};
use crate::features::users::models::NewUser;
use crate::features::users::repositories::UserRepository;

const TOKEN_TYPE: &str = "bearer";

/// Service for account registration and token issuance
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Register a new buyer or seller account
    pub async fn register(&self, dto: RegisterUserDto) -> Result<UserResponseDto> {
        let email = normalize_email(&dto.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let hashed_password = hash_password(&dto.password)?;
        let user = self
            .users
            .insert(NewUser {
                email,
                hashed_password,
                role: dto.role,
            })
            .await?;

        tracing::info!("Registered user {} with role {}", user.id, user.role);
        Ok(user.into())
    }

    /// Verify credentials and issue an access/refresh token pair
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenPairDto> {
        let invalid = || AppError::Unauthorized("Incorrect email or password".to_string());

        let user = self
            .users
            .find_by_email(&normalize_email(&dto.username))
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(invalid)?;

        if !verify_password(&dto.password, &user.hashed_password) {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(invalid());
        }

        let subject = TokenSubject::from(&user);
        let access = self.tokens.create_access_token(&subject)?;
        let refresh = self.tokens.create_refresh_token(&subject)?;

        Ok(TokenPairDto {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: access.expires_in,
        })
    }

    /// Issue a new access token from a valid refresh token
    pub async fn refresh(&self, dto: RefreshTokenRequestDto) -> Result<AccessTokenDto> {
        let invalid = || AppError::Unauthorized("Could not validate refresh token".to_string());

        let claims = self
            .tokens
            .verify(&dto.refresh_token, TokenKind::Refresh)
            .map_err(|_| invalid())?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(invalid)?;

        let access = self.tokens.create_access_token(&TokenSubject::from(&user))?;

        Ok(AccessTokenDto {
            access_token: access.token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: access.expires_in,
        })
    }

    /// Current account for the /me endpoint
    pub async fn get_current_user(&self, user: &AuthenticatedUser) -> Result<UserResponseDto> {
        self.users
            .find_by_id(user.id)
            .await?
            .map(UserResponseDto::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
