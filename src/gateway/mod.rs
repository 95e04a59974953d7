pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::account::Database;
use crate::config::AppConfig;
use crate::user_auth::{self, UserAuthService};
use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(config: &AppConfig, db: Arc<Database>, jwt_secret: String) {
    let user_auth = Arc::new(UserAuthService::new(
        db.pool().clone(),
        &jwt_secret,
        config.auth.token_ttl_secs,
    ));

    let state = Arc::new(AppState::new(db, user_auth));

    // ==========================================================================
    // Credential Routes (no session required; these establish identity)
    // ==========================================================================
    let auth_routes = Router::new()
        .route("/register", post(user_auth::handlers::register))
        .route("/login", post(user_auth::handlers::login));

    // ==========================================================================
    // Session Routes - behind the bearer-token guard
    // ==========================================================================
    let user_routes = Router::new()
        .route("/protected", get(user_auth::handlers::protected_probe))
        .route(
            "/protected/clerk",
            get(user_auth::handlers::clerk_probe)
                .route_layer(from_fn(user_auth::middleware::clerk_guard)),
        )
        .route("/password", post(user_auth::handlers::change_password))
        .layer(from_fn_with_state(
            state.clone(),
            user_auth::middleware::jwt_auth_middleware,
        ));

    // Build complete router
    let app = Router::new()
        // Health check
        .route("/api/v1/health", get(handlers::health_check))
        // API Routes
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/user", user_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    // Bind address
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.gateway.port, config.gateway.port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);
    println!("🔓 Credential API: /api/v1/auth/*");
    println!("🔒 Session API:    /api/v1/user/* (bearer token required)");

    // Start server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
