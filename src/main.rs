//! Newsdesk Backend
//!
//! REST backend for a gaming-news outlet: an in-memory article store with filtering,
//! a passphrase-gated admin surface and AI-assisted content generation.

mod admin;
mod api;
mod auth;
mod config;
mod errors;
mod gateway;
mod models;
mod search;
mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use gateway::{ContentGateway, GeminiClient, GenerativeModel, ImageEndpoint, UnconfiguredModel};
use store::Repository;

/// Largest accepted image upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub gateway: Arc<ContentGateway>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Newsdesk Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if the admin passphrase is not configured
    if config.admin_passphrase.is_none() {
        tracing::warn!(
            "No admin passphrase configured (NEWSDESK_ADMIN_PASSPHRASE). Admin routes are open!"
        );
    }

    let repo = Arc::new(store::init_repository(config.seed_demo));
    let gateway = Arc::new(build_gateway(&config)?);
    tracing::info!("Content gateway using model: {}", gateway.model_name());

    // Create application state
    let state = AppState {
        repo,
        gateway,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Wire the generative model and image endpoint into a gateway.
///
/// Without an API key the gateway still starts; every generation call then fails.
fn build_gateway(config: &Config) -> Result<ContentGateway, gateway::GatewayError> {
    let model: Arc<dyn GenerativeModel> = match &config.gemini_api_key {
        Some(_) => Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_base_url.as_str(),
            config.gemini_model.as_str(),
            config.gateway_timeout,
        )?),
        None => {
            tracing::warn!(
                "No Gemini API key configured (NEWSDESK_GEMINI_API_KEY). Content generation is disabled!"
            );
            Arc::new(UnconfiguredModel)
        }
    };

    Ok(ContentGateway::new(
        model,
        ImageEndpoint::new(&config.image_endpoint)?,
        config.source_label.as_str(),
        config.date_format.as_str(),
    ))
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone passphrase for the auth layer
    let passphrase = state.config.admin_passphrase.clone();

    // Admin routes
    let admin_routes = Router::new()
        .route("/stats", get(api::get_stats))
        .route("/articles", post(api::create_article))
        .route(
            "/articles/{id}",
            put(api::update_article).delete(api::delete_article),
        )
        .route("/generate", post(api::generate_news))
        .route("/search", post(api::search_latest))
        .route("/import", post(api::import_feed))
        .route("/review-assist", post(api::review_assist))
        .route(
            "/images",
            post(api::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/image-search", get(api::image_search))
        // Apply admin auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(passphrase.clone(), req, next)
        }));

    // Public routes
    let api_routes = Router::new()
        .route("/articles", get(api::list_articles))
        .route("/articles/{id}", get(api::get_article))
        .route("/categories", get(api::list_categories))
        .route("/community/games", get(api::list_games))
        .route("/community/games/{id}/vote", post(api::vote))
        // Login check sits outside the gate
        .route("/admin/session", post(api::create_session))
        .nest("/admin", admin_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
