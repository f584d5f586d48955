use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    domain::{NewUser, User},
    error::{AppError, Result},
    repository::UserRepository,
};

struct UserState {
    users: Vec<User>,
    next_id: i64,
}

pub struct InMemoryUserRepository {
    state: RwLock<UserState>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(UserState {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut state = self.state.write().await;

        // The service checks first, but the uniqueness invariant lives
        // here, under the write lock.
        if state.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }

        let user = User {
            id: state.next_id,
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };

        state.next_id += 1;
        state.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }
}
