//! Unit tests for the auth crate

#[cfg(test)]
mod token_tests {
    use crate::application::config::AuthConfig;
    use crate::application::token::{TokenError, TokenService};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn service() -> TokenService {
        TokenService::new(Arc::new(AuthConfig::with_random_secret()))
    }

    /// Flip the first character of the signature segment
    fn tamper_signature(token: &str) -> String {
        let (payload, signature) = token.split_once('.').unwrap();
        let mut sig: Vec<char> = signature.chars().collect();
        sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
        format!("{}.{}", payload, sig.into_iter().collect::<String>())
    }

    #[test]
    fn test_round_trip_returns_subject_unchanged() {
        let tokens = service();
        let token = tokens.issue("a@x.com");
        assert_eq!(tokens.verify(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn test_expiry_is_a_hard_boundary() {
        let tokens = service();
        let issued_at = Utc::now();
        let token = tokens.issue_at("a@x.com", issued_at);

        // One second before expiry: still valid
        let just_before = issued_at + Duration::seconds(30 * 60 - 1);
        assert!(tokens.verify_at(&token, just_before).is_ok());

        // Exactly at issued + ttl: expired, equality counts
        let at_expiry = issued_at + Duration::seconds(30 * 60);
        assert_eq!(
            tokens.verify_at(&token, at_expiry),
            Err(TokenError::Expired)
        );

        // Any time after: still expired
        let later = issued_at + Duration::hours(2);
        assert_eq!(tokens.verify_at(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_signature_is_bad_signature() {
        let tokens = service();
        let token = tokens.issue("a@x.com");
        assert_eq!(
            tokens.verify(&tamper_signature(&token)),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let tokens = service();
        let token = tokens.issue("a@x.com");
        let (payload, signature) = token.split_once('.').unwrap();
        let mut payload: Vec<char> = payload.chars().collect();
        payload[0] = if payload[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!(
            "{}.{}",
            payload.into_iter().collect::<String>(),
            signature
        );
        assert_eq!(tokens.verify(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let token = service().issue("a@x.com");
        let other = service();
        assert_eq!(other.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_structurally_invalid_is_malformed() {
        let tokens = service();
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("no-dot-here"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_custom_ttl_is_respected() {
        let config = AuthConfig {
            token_ttl: std::time::Duration::from_secs(60),
            ..AuthConfig::with_random_secret()
        };
        let tokens = TokenService::new(Arc::new(config));

        let issued_at = Utc::now();
        let token = tokens.issue_at("a@x.com", issued_at);

        assert!(tokens
            .verify_at(&token, issued_at + Duration::seconds(59))
            .is_ok());
        assert_eq!(
            tokens.verify_at(&token, issued_at + Duration::seconds(60)),
            Err(TokenError::Expired)
        );
    }
}

#[cfg(test)]
mod repository_tests {
    use crate::domain::entity::user::NewUser;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::email::Email;
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;
    use platform::password::ClearTextPassword;

    fn new_user(email: &str) -> NewUser {
        NewUser::new(
            Email::new(email).unwrap(),
            ClearTextPassword::new("secret1".to_string())
                .unwrap()
                .hash()
                .unwrap(),
        )
    }

    /// The store itself enforces email uniqueness, not just the use case's
    /// existence check. Two concurrent signups for the same address race
    /// past that check; the second insert must still come back as
    /// EmailTaken, never as a bare store error.
    #[tokio::test]
    async fn test_duplicate_insert_is_email_taken() {
        let repo = InMemoryAuthRepository::new();

        repo.create(new_user("a@x.com")).await.unwrap();
        let err = repo.create(new_user("a@x.com")).await.unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }
}

#[cfg(test)]
mod use_case_tests {
    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::application::{
        CurrentUserUseCase, LoginInput, LoginUseCase, SignUpInput, SignUpUseCase,
    };
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryAuthRepository;
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryAuthRepository>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryAuthRepository::new()),
            Arc::new(AuthConfig::with_random_secret()),
        )
    }

    async fn register(repo: &Arc<InMemoryAuthRepository>, email: &str, password: &str) {
        SignUpUseCase::new(repo.clone())
            .execute(SignUpInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sign_up_returns_public_view() {
        let (repo, _) = setup();
        let output = SignUpUseCase::new(repo.clone())
            .execute(SignUpInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.email, "a@x.com");
        assert_eq!(output.id.as_i64(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_rejected() {
        let (repo, _) = setup();
        register(&repo, "a@x.com", "secret1").await;

        let err = SignUpUseCase::new(repo.clone())
            .execute(SignUpInput {
                email: "a@x.com".to_string(),
                password: "other-password".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_sign_up_reports_all_violations() {
        let (repo, _) = setup();
        let err = SignUpUseCase::new(repo.clone())
            .execute(SignUpInput {
                email: "not-an-email".to_string(),
                password: "short".to_string(),
            })
            .await
            .unwrap_err();

        let AuthError::Validation(message) = err else {
            panic!("expected validation error, got {err:?}");
        };
        // Both the email and the password problem are reported
        assert!(message.contains("email"));
        assert!(message.contains("at least 6"));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (repo, config) = setup();
        register(&repo, "a@x.com", "secret1").await;

        let output = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        let tokens = TokenService::new(config);
        assert_eq!(tokens.verify(&output.access_token).unwrap(), "a@x.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let (repo, config) = setup();
        register(&repo, "a@x.com", "secret1").await;

        // Wrong password for an existing user
        let wrong_password = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "a@x.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        // Unknown email entirely
        let unknown_email = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "nobody@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        // Identical message on the wire
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_current_user_resolves_token() {
        let (repo, config) = setup();
        register(&repo, "a@x.com", "secret1").await;

        let token = TokenService::new(config.clone()).issue("a@x.com");
        let user = CurrentUserUseCase::new(repo.clone(), config)
            .execute(&token)
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_current_user_rejects_vanished_subject() {
        // Valid signature, but no user behind the subject (e.g. deleted
        // after the token was issued)
        let (repo, config) = setup();
        let token = TokenService::new(config.clone()).issue("ghost@x.com");

        let err = CurrentUserUseCase::new(repo.clone(), config)
            .execute(&token)
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UnknownSubject));
    }
}

#[cfg(test)]
mod router_tests {
    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::middleware::{self, AuthMiddlewareState, CurrentUser};
    use crate::presentation::router::auth_router_generic;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Extension, Router, routing::get};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<InMemoryAuthRepository>, Arc<AuthConfig>) {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        let router = auth_router_generic((*repo).clone(), config.clone());
        (router, repo, config)
    }

    fn signup_request(email: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(
                r#"{{"email":"{email}","password":"{password}"}}"#
            )))
            .unwrap()
    }

    fn token_request(username: &str, password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/token")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let (app, _, _) = app();

        let response = app
            .clone()
            .oneshot(signup_request("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "a@x.com");
        assert!(body.get("password_hash").is_none());

        let response = app
            .oneshot(signup_request("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_token_endpoint_issues_bearer() {
        let (app, _, _) = app();

        app.clone()
            .oneshot(signup_request("a@x.com", "secret1"))
            .await
            .unwrap();

        let response = app
            .oneshot(token_request("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["token_type"], "bearer");
        assert!(!body["access_token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_credentials_get_bearer_challenge() {
        let (app, _, _) = app();

        let response = app
            .oneshot(token_request("nobody@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    fn protected_app(
        repo: Arc<InMemoryAuthRepository>,
        config: Arc<AuthConfig>,
    ) -> Router {
        let state = AuthMiddlewareState { repo, config };
        Router::new()
            .route(
                "/me",
                get(|Extension(CurrentUser(user)): Extension<CurrentUser>| async move {
                    user.email.as_str().to_string()
                }),
            )
            .layer(axum::middleware::from_fn(move |req, next| {
                let state = state.clone();
                async move { middleware::require_auth(state, req, next).await }
            }))
    }

    #[tokio::test]
    async fn test_middleware_rejects_missing_and_garbage_tokens() {
        let (_, repo, config) = app();
        let protected = protected_app(repo, config);

        let response = protected
            .clone()
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let response = protected
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_middleware_passes_authenticated_user() {
        let (auth, repo, config) = app();

        auth.clone()
            .oneshot(signup_request("a@x.com", "secret1"))
            .await
            .unwrap();
        let response = auth
            .oneshot(token_request("a@x.com", "secret1"))
            .await
            .unwrap();
        let token = body_json(response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string();

        let protected = protected_app(repo, config);
        let response = protected
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"a@x.com");
    }
}
