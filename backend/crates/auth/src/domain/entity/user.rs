//! User Entity
//!
//! Core user identity record. The numeric id is assigned by the store on
//! creation; everything else is fixed at signup and never mutated.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::email::Email;

/// User entity
///
/// The password hash is opaque and never serialized outward; API responses
/// expose only id and email.
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Unique email, used as the login identifier and token subject
    pub email: Email,
    /// Argon2id PHC hash of the password
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// A user about to be created; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: Email, password_hash: HashedPassword) -> Self {
        Self {
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Attach the store-assigned id, producing the persisted entity
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}
