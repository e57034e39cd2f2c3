// src/api/handlers/system_handler.rs

use axum::{routing::get, Router};

/// 死活監視用（認証不要）
pub async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn system_router() -> Router {
    Router::new().route("/health", get(health_check_handler))
}
