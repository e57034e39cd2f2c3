// src/main.rs
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use translation_gateway::api::{app_router, AppState};
use translation_gateway::config::AppConfig;
use translation_gateway::db::create_db_pool;
use translation_gateway::infrastructure::outbound::{
    HistoryClient, OutboundClient, SubscriptionClient,
};
use translation_gateway::repository::user_repository::UserRepository;
use translation_gateway::service::translation_service::TranslationService;
use translation_gateway::utils::jwt::JwtManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translation_gateway=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Translation Gateway server...");

    // 設定を読み込む
    let app_config = Arc::new(AppConfig::from_env()?);
    tracing::info!(
        environment = %app_config.environment,
        api_prefix = %app_config.api_prefix,
        subscription_service = %app_config.gateway.subscription_base_url,
        history_service = %app_config.gateway.history_base_url,
        "Configuration loaded"
    );

    // データベース接続とマイグレーション
    let db_pool = create_db_pool(&app_config).await?;
    Migrator::up(&db_pool, None).await?;
    tracing::info!("Database pool created and migrations applied.");

    // 外部サービスクライアントは一つの reqwest::Client を共有する
    let outbound = OutboundClient::new(&app_config.gateway)?;
    let translation_service = Arc::new(TranslationService::new(
        Arc::new(UserRepository::new(db_pool)),
        SubscriptionClient::new(outbound.clone(), &app_config.gateway),
        HistoryClient::new(outbound, &app_config.gateway),
    ));

    let jwt_manager = Arc::new(JwtManager::new(app_config.jwt.clone())?);

    let app_state = AppState::new(translation_service, jwt_manager, app_config.clone());
    let app = app_router(app_state);

    let server_addr = app_config.server_addr();
    let listener = TcpListener::bind(&server_addr).await?;
    tracing::info!("Router configured. Server listening on {}", server_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
