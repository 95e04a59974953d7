//! Ward Access - credential and session-authorization gateway
//!
//! Startup order:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Secret  │───▶│  Store   │───▶│ Gateway  │
//! │  (YAML)  │    │  (env)   │    │ (PG pool)│    │  (axum)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! The process refuses to start without a signing secret or a reachable
//! store.

use std::sync::Arc;

use ward_access::account::Database;
use ward_access::config::AppConfig;
use ward_access::{gateway, logging};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--env" && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = logging::init_logging(&config);

    tracing::info!(
        "ward_access {} ({}) starting, env={}",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env
    );

    // Signing secret is process configuration; no secret, no server.
    let jwt_secret = match std::env::var("JWT_SECRET") {
        Ok(s) if !s.is_empty() => s,
        _ => {
            eprintln!("❌ FATAL: JWT_SECRET environment variable is not set");
            std::process::exit(1);
        }
    };

    // No server without a reachable store.
    let db = match Database::connect(&config.postgres_url).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!("❌ FATAL: Unable to connect to DB: {}", e);
            std::process::exit(1);
        }
    };

    gateway::run_server(&config, db, jwt_secret).await;
}
