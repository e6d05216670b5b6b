mod user_repository;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::users::models::{NewUser, User};

pub use user_repository::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>>;
    /// Fails with a bad request when the email is already taken
    async fn insert(&self, new_user: NewUser) -> Result<User>;
}
