use std::sync::Arc;

use crate::{
    auth::AuthService,
    domain::{NewUser, User},
    error::{AppError, Result},
    repository::UserRepository,
};

pub struct AccountService {
    repo: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<User> {
        // Check for duplicate email (exact match)
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = AuthService::hash_password(password).await?;

        let user = self
            .repo
            .create(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "registered new user");

        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !AuthService::verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn current_user(&self, user_id: i64) -> Result<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
