// src/api/mod.rs
use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::cors_layer;
use crate::service::translation_service::TranslationService;
use crate::utils::jwt::JwtManager;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub translation_service: Arc<TranslationService>,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        translation_service: Arc<TranslationService>,
        jwt_manager: Arc<JwtManager>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            translation_service,
            jwt_manager,
            config,
        }
    }
}

/// アプリケーション全体のルーター
///
/// ゲートウェイのルートは `api_prefix` 配下に、`/health` はルートに配置する。
pub fn app_router(app_state: AppState) -> Router {
    let prefix = app_state.config.api_prefix.clone();
    let cors = cors_layer(&app_state.config.cors_allowed_origins);
    let gateway = handlers::translation_handler::translation_router(app_state);

    // axum は空のパスへの nest を許可しない
    let router = if prefix.is_empty() {
        Router::new().merge(gateway)
    } else {
        Router::new().nest(&prefix, gateway)
    };

    router
        .merge(handlers::system_handler::system_router())
        .layer(from_fn(logging_middleware))
        .layer(from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
