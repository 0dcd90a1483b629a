use std::time::Duration;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Environment, SecurityConfig, StoreBackend};
use crate::handlers;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        // Public
        .route("/", get(handlers::public::system::root))
        .route("/health", get(handlers::public::system::health))
        .merge(user_routes())
        .merge(profile_routes())
        .merge(post_routes())
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config.environment, &config.security))
                .layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs)))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        )
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    use handlers::protected::users;

    Router::new().route("/users/current", get(users::current))
}

fn profile_routes() -> Router<AppState> {
    use axum::routing::{delete, post};
    use handlers::{protected, public};

    Router::new()
        // The caller's own profile
        .route(
            "/profile",
            get(protected::profile::current)
                .post(protected::profile::upsert)
                .delete(protected::profile::delete_account),
        )
        .route("/profile/experience", post(protected::profile::add_experience))
        .route("/profile/experience/:exp_id", delete(protected::profile::remove_experience))
        .route("/profile/education", post(protected::profile::add_education))
        .route("/profile/education/:edu_id", delete(protected::profile::remove_education))
        // Public reads
        .route("/profile/test", get(public::profile::test))
        .route("/profile/all", get(public::profile::all))
        .route("/profile/handle/:handle", get(public::profile::by_handle))
        .route("/profile/user/:user_id", get(public::profile::by_user))
}

fn post_routes() -> Router<AppState> {
    use axum::routing::{delete, post};
    use handlers::{protected, public};

    Router::new()
        .route("/posts", get(public::posts::list).post(protected::posts::create))
        .route("/posts/test", get(public::posts::test))
        .route("/posts/:id", get(public::posts::show).delete(protected::posts::delete))
        .route("/posts/like/:id", post(protected::posts::like))
        .route("/posts/unlike/:id", post(protected::posts::unlike))
        .route("/posts/comment/:id", post(protected::posts::comment))
        .route("/posts/comment/:id/:comment_id", delete(protected::posts::uncomment))
}

/// Permissive in development; otherwise only the configured origins.
fn cors_layer(environment: Environment, security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("devconnector_api=debug,tower_http=info"));
    // A second init (tests, CLI) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Refuse configurations the server must not start with
pub fn check_startup(config: &AppConfig) -> anyhow::Result<()> {
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set");
    }
    if config.environment == Environment::Production && config.database.backend == StoreBackend::Memory {
        anyhow::bail!("The in-memory store cannot be used in production");
    }
    Ok(())
}

/// Bind the configured port and serve until ctrl-c.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    use anyhow::Context;

    check_startup(&config)?;

    let port = config.api.port;
    tracing::info!("Starting DevConnector API in {:?} mode", config.environment);

    let state = AppState::from_config(config).await.context("failed to initialise storage")?;

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("DevConnector API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_requires_a_jwt_secret() {
        let mut config = AppConfig::for_tests();
        assert!(check_startup(&config).is_ok());
        config.security.jwt_secret.clear();
        assert!(check_startup(&config).is_err());
    }

    #[test]
    fn production_refuses_the_memory_store() {
        let mut config = AppConfig::for_tests();
        config.environment = Environment::Production;
        assert!(check_startup(&config).is_err());
        config.database.backend = StoreBackend::Postgres;
        assert!(check_startup(&config).is_ok());
    }
}
