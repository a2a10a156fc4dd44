//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::domain::repository::UserRepository;
use auth::{
    AuthConfig, AuthMiddlewareState, InMemoryAuthRepository, PgAuthRepository, middleware,
};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use posts::domain::repository::PostRepository;
use posts::{InMemoryPostRepository, PgPostRepository, PostCache};
use posts::router::posts_router_generic;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Assemble the application routes over any pair of repositories:
/// `/auth` routes are open, `/posts` routes sit behind the bearer
/// middleware. One post cache per process.
fn app_router<UR, PR>(
    auth_repo: UR,
    post_repo: PR,
    config: Arc<AuthConfig>,
    cache: Arc<PostCache>,
) -> Router
where
    UR: UserRepository + Clone + Send + Sync + 'static,
    PR: PostRepository + Clone + Send + Sync + 'static,
{
    let middleware_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: config.clone(),
    };
    let protected_posts = posts_router_generic(post_repo, cache).layer(
        axum::middleware::from_fn(move |req, next| {
            let state = middleware_state.clone();
            async move { middleware::require_auth(state, req, next).await }
        }),
    );

    Router::new()
        .nest("/auth", auth::router::auth_router_generic(auth_repo, config))
        .nest("/posts", protected_posts)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,posts=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Token configuration
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::with_random_secret()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("APP_TOKEN_SECRET").expect("APP_TOKEN_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "APP_TOKEN_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            token_secret: secret,
            ..AuthConfig::default()
        }
    };
    if let Ok(ttl_secs) = env::var("APP_TOKEN_TTL_SECS") {
        config.token_ttl = Duration::from_secs(ttl_secs.parse()?);
    }
    let config = Arc::new(config);

    // Shared post list cache, one per process
    let cache = Arc::new(PostCache::new());

    // Store selection: Postgres when DATABASE_URL is set, otherwise a
    // process-local in-memory store (data is lost on restart)
    let routes = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Create tables on first run
            let auth_repo = PgAuthRepository::new(pool.clone());
            auth_repo.ensure_schema().await?;

            let post_repo = PgPostRepository::new(pool.clone());
            post_repo.ensure_schema().await?;

            tracing::info!("Schema ready");

            app_router(auth_repo, post_repo, config, cache)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory stores");
            app_router(
                InMemoryAuthRepository::new(),
                InMemoryPostRepository::new(),
                config,
                cache,
            )
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = routes.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// The no-database configuration serves the full surface: signup,
    /// token issuance, and an authenticated post round trip
    #[tokio::test]
    async fn test_in_memory_stores_serve_full_surface() {
        let app = app_router(
            InMemoryAuthRepository::new(),
            InMemoryPostRepository::new(),
            Arc::new(AuthConfig::with_random_secret()),
            Arc::new(PostCache::new()),
        );

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/signup")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"email":"a@x.com","password":"secret1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/token")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=a@x.com&password=secret1"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let token_body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let token = token_body["access_token"].as_str().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/posts")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/posts")
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
        let listed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }
}
