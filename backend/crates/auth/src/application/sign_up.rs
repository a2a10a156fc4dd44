//! Sign Up Use Case
//!
//! Registers a new user account.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up output (public view only, never the hash)
#[derive(Debug)]
pub struct SignUpOutput {
    pub id: UserId,
    pub email: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate both fields and report every violation, not just the first
        let (email, password) =
            match (Email::new(&input.email), ClearTextPassword::new(input.password)) {
                (Ok(email), Ok(password)) => (email, password),
                (email, password) => {
                    let mut violations = Vec::new();
                    if let Err(e) = &email {
                        violations.push(e.message().to_string());
                    }
                    if let Err(e) = &password {
                        violations.push(e.to_string());
                    }
                    return Err(AuthError::Validation(violations.join("; ")));
                }
            };

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .repo
            .create(NewUser {
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(SignUpOutput {
            id: user.id,
            email: user.email.into_db(),
        })
    }
}
