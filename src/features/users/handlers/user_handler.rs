use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppForm, AppJson};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    AccessTokenDto, LoginRequestDto, RefreshTokenQuery, RefreshTokenRequestDto, RegisterUserDto,
    TokenPairDto, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error or email already registered")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<RegisterUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user), None, None)),
    ))
}

/// Login with email (as `username`) and password.
///
/// Answers with a bare OAuth2 token response so password-grant clients can read `access_token`.
#[utoipa::path(
    post,
    path = "/users/token",
    request_body(content = LoginRequestDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenPairDto),
        (status = 400, description = "Malformed form"),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "users"
)]
pub async fn login(
    State(service): State<Arc<UserService>>,
    AppForm(dto): AppForm<LoginRequestDto>,
) -> Result<Json<TokenPairDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tokens = service.login(dto).await?;
    Ok(Json(tokens))
}

/// Refresh access token using refresh token.
///
/// The token is read from the `refresh_token` query parameter or, when a JSON body is sent, from the body.
#[utoipa::path(
    post,
    path = "/users/refresh-token",
    params(RefreshTokenQuery),
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<AccessTokenDto>),
        (status = 400, description = "Refresh token missing"),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "users"
)]
pub async fn refresh_token(
    State(service): State<Arc<UserService>>,
    Query(query): Query<RefreshTokenQuery>,
    body: Option<AppJson<RefreshTokenRequestDto>>,
) -> Result<Json<ApiResponse<AccessTokenDto>>> {
    let dto = match (body, query.refresh_token) {
        (Some(AppJson(dto)), _) => dto,
        (None, Some(refresh_token)) => RefreshTokenRequestDto { refresh_token },
        (None, None) => {
            return Err(AppError::Validation("Refresh token is required".to_string()));
        }
    };
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.refresh(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<UserResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user_data = service.get_current_user(&user).await?;
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use fake::{faker::internet::en::SafeEmail, Fake};
    use serde_json::{json, Value};

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_register_returns_created_user() {
        let app = TestApp::new();
        let email: String = SafeEmail().fake();

        let response = app
            .server
            .post("/users")
            .json(&json!({ "email": email, "password": "password123", "role": "seller" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], email.to_lowercase());
        assert_eq!(body["data"]["role"], "seller");
        assert_eq!(body["data"]["is_active"], true);
        assert!(body["data"].get("hashed_password").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_400() {
        let app = TestApp::new();
        let payload = json!({ "email": "dup@example.com", "password": "password123" });

        app.server.post("/users").json(&payload).await;
        let response = app.server.post("/users").json(&payload).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email already registered");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/users")
            .json(&json!({ "email": "short@example.com", "password": "123" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let app = TestApp::new();

        let response = app
            .server
            .post("/users")
            .json(&json!({ "email": "r@example.com", "password": "password123", "role": "admin" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_returns_token_pair() {
        let app = TestApp::new();
        app.register("buyer@example.com", "password123", "buyer")
            .await;

        let response = app
            .server
            .post("/users/token")
            .form(&[("username", "buyer@example.com"), ("password", "password123")])
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert!(body["access_token"].as_str().is_some());
        assert!(body["refresh_token"].as_str().is_some());
        assert_eq!(body["token_type"], "bearer");
        assert!(body["expires_in"].as_i64().is_some());
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_login_invalid_credentials_returns_401_with_challenge() {
        let app = TestApp::new();
        app.register("buyer@example.com", "password123", "buyer")
            .await;

        let response = app
            .server
            .post("/users/token")
            .form(&[("username", "buyer@example.com"), ("password", "nope-nope")])
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body: Value = response.json();
        assert_eq!(body["message"], "Incorrect email or password");
    }

    #[tokio::test]
    async fn test_refresh_token_flow() {
        let app = TestApp::new();
        app.register("seller@example.com", "password123", "seller")
            .await;
        let tokens = app.login("seller@example.com", "password123").await;

        let response = app
            .server
            .post("/users/refresh-token")
            .json(&json!({ "refresh_token": tokens.refresh_token }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        let new_access = body["data"]["access_token"].as_str().unwrap().to_string();

        let me = app
            .server
            .get("/users/me")
            .authorization_bearer(new_access)
            .await;
        assert_eq!(me.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_refresh_token_from_query_parameter() {
        let app = TestApp::new();
        app.register("seller@example.com", "password123", "seller")
            .await;
        let tokens = app.login("seller@example.com", "password123").await;

        let response = app
            .server
            .post("/users/refresh-token")
            .add_query_param("refresh_token", &tokens.refresh_token)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert!(body["data"]["access_token"].as_str().is_some());
        assert_eq!(body["data"]["token_type"], "bearer");
    }

    #[tokio::test]
    async fn test_refresh_token_missing_everywhere_returns_400() {
        let app = TestApp::new();

        let response = app.server.post("/users/refresh-token").await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_refresh_with_access_token_returns_401() {
        let app = TestApp::new();
        app.register("seller@example.com", "password123", "seller")
            .await;
        let tokens = app.login("seller@example.com", "password123").await;

        let response = app
            .server
            .post("/users/refresh-token")
            .json(&json!({ "refresh_token": tokens.access_token }))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let app = TestApp::new();

        let missing = app.server.get("/users/me").await;
        assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

        let garbage = app
            .server
            .get("/users/me")
            .authorization_bearer("garbage")
            .await;
        assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_a_bearer_credential() {
        let app = TestApp::new();
        app.register("buyer@example.com", "password123", "buyer")
            .await;
        let tokens = app.login("buyer@example.com", "password123").await;

        let response = app
            .server
            .get("/users/me")
            .authorization_bearer(tokens.refresh_token)
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_returns_current_user() {
        let app = TestApp::new();
        app.register("me@example.com", "password123", "buyer").await;
        let tokens = app.login("me@example.com", "password123").await;

        let response = app
            .server
            .get("/users/me")
            .authorization_bearer(tokens.access_token)
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["email"], "me@example.com");
        assert_eq!(body["data"]["role"], "buyer");
    }
}
