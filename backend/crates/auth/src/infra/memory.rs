//! In-Memory Repository Implementation
//!
//! Process-local user store used by tests and by the server when no
//! database is configured. Ids come from an atomic counter, mirroring the
//! BIGSERIAL behavior of the Postgres implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<Mutex<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, HashMap<i64, User>>> {
        self.users
            .lock()
            .map_err(|_| AuthError::Internal("User store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, new_user: NewUser) -> AuthResult<User> {
        let mut users = self.lock()?;

        // Unique-email constraint, like the database index
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailTaken);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = new_user.into_user(UserId::from_raw(id));
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.get(&user_id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.lock()?;
        Ok(users.values().any(|u| &u.email == email))
    }
}
