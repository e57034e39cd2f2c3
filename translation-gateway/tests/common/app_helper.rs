// tests/common/app_helper.rs

use async_trait::async_trait;
use axum::Router;
use httpmock::MockServer;
use reqwest::Url;
use sea_orm::DbErr;
use std::sync::Arc;
use translation_gateway::api::{app_router, AppState};
use translation_gateway::config::{AppConfig, GatewayConfig};
use translation_gateway::domain::user_model::{self, UserSummary};
use translation_gateway::error::{AppError, AppResult};
use translation_gateway::infrastructure::outbound::{
    HistoryClient, OutboundClient, SubscriptionClient,
};
use translation_gateway::repository::user_repository::{UserDirectory, UserFilter, UserPage};
use translation_gateway::service::translation_service::TranslationService;
use translation_gateway::utils::jwt::JwtManager;
use uuid::Uuid;

pub const SUBSCRIPTION_BASE_PATH: &str = "/kness-app-api";
pub const HISTORY_BASE_PATH: &str = "/open_web_ui_api";
pub const API_PREFIX: &str = "/api/v1/translations";

/// メモリ上のユーザーディレクトリ（作成日時順）
pub struct InMemoryDirectory {
    users: Vec<user_model::Model>,
}

impl InMemoryDirectory {
    pub fn new(mut users: Vec<user_model::Model>) -> Self {
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn list_users(&self, filter: &UserFilter, skip: u64, limit: u64) -> AppResult<UserPage> {
        let matched: Vec<&user_model::Model> = self
            .users
            .iter()
            .filter(|user| filter.role.is_none_or(|role| user.user_role() == role))
            .filter(|user| match filter.query.as_deref() {
                Some(q) => {
                    let q = q.to_lowercase();
                    user.email.to_lowercase().contains(&q) || user.name.to_lowercase().contains(&q)
                }
                None => true,
            })
            .collect();

        Ok(UserPage {
            total: matched.len() as u64,
            users: matched
                .into_iter()
                .skip(skip as usize)
                .take(limit as usize)
                .map(|user| UserSummary::from(user.clone()))
                .collect(),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<user_model::Model>> {
        Ok(self.users.iter().find(|user| user.id == id).cloned())
    }
}

/// 常に失敗するユーザーディレクトリ
pub struct FailingDirectory;

#[async_trait]
impl UserDirectory for FailingDirectory {
    async fn list_users(&self, _: &UserFilter, _: u64, _: u64) -> AppResult<UserPage> {
        Err(AppError::DbErr(DbErr::Custom("directory unavailable".to_string())))
    }

    async fn find_by_id(&self, _: Uuid) -> AppResult<Option<user_model::Model>> {
        Err(AppError::DbErr(DbErr::Custom("directory unavailable".to_string())))
    }
}

/// モックサーバーを外部サービスとして使う設定
pub fn test_config(server: &MockServer) -> AppConfig {
    test_config_with_base(&server.base_url())
}

/// 任意のホストを外部サービスとして使う設定
pub fn test_config_with_base(base: &str) -> AppConfig {
    let subscription_base = Url::parse(&format!("{}{}", base, SUBSCRIPTION_BASE_PATH)).unwrap();
    let history_base = Url::parse(&format!("{}{}", base, HISTORY_BASE_PATH)).unwrap();

    let mut config = AppConfig::for_testing();
    config.gateway = GatewayConfig::with_base_urls(subscription_base, history_base);
    config
}

/// 設定とディレクトリからアプリケーション全体のルーターを構築
pub fn build_app(config: AppConfig, directory: Arc<dyn UserDirectory>) -> Router {
    super::init_test_env();

    let config = Arc::new(config);
    let outbound = OutboundClient::new(&config.gateway).unwrap();
    let translation_service = Arc::new(TranslationService::new(
        directory,
        SubscriptionClient::new(outbound.clone(), &config.gateway),
        HistoryClient::new(outbound, &config.gateway),
    ));
    let jwt_manager = Arc::new(JwtManager::new(config.jwt.clone()).unwrap());

    app_router(AppState::new(translation_service, jwt_manager, config))
}

/// モックサーバーとメモリ上のユーザーでアプリを構築
pub fn setup_app(server: &MockServer, users: Vec<user_model::Model>) -> Router {
    build_app(test_config(server), Arc::new(InMemoryDirectory::new(users)))
}
