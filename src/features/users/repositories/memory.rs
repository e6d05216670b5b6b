//! In-memory user store for service and handler tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use super::UserRepository;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{NewUser, User, UserRole};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing hashing
    pub async fn seed(&self, email: &str, hashed_password: &str, role: UserRole) -> User {
        self.insert(NewUser {
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            role,
        })
        .await
        .expect("seed user")
    }

    pub async fn deactivate(&self, id: i32) {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.is_active = false;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: new_user.email,
            hashed_password: new_user.hashed_password,
            role: new_user.role,
            is_active: true,
        };
        users.push(user.clone());
        Ok(user)
    }
}
