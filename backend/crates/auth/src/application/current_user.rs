//! Current User Use Case
//!
//! Resolves a bearer token to the authenticated user. Pure composition of
//! the token service and the user repository; no caching, no state.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens: TokenService::new(config),
        }
    }

    /// Verify the token and load the user it names.
    ///
    /// A token whose subject no longer exists (user deleted after issuance)
    /// is rejected; we never fabricate a user.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let subject = self.tokens.verify(token)?;

        let email = Email::new(&subject).map_err(|_| AuthError::UnknownSubject)?;

        self.repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }
}
