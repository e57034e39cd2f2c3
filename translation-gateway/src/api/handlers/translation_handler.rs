// src/api/handlers/translation_handler.rs

use crate::api::dto::translation_dto::{HistoryQuery, MergedSubscriptionView, TierUpdateRequest};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{jwt_auth_middleware, AdminUser, AuthMiddlewareConfig, VerifiedUser};
use axum::{
    extract::{Json, Query, State},
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};
use serde_json::Value;
use tracing::info;

// --- Handler Functions ---

/// 全ユーザーのサブスクリプション一覧（管理者用）
pub async fn list_admin_subscriptions_handler(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> AppResult<Json<Vec<MergedSubscriptionView>>> {
    info!(admin_id = %admin.user_id(), "Listing subscriptions for all users");

    let subscriptions = app_state
        .translation_service
        .list_admin_subscriptions()
        .await?;

    Ok(Json(subscriptions))
}

/// ユーザーの料金プラン変更（管理者用）
pub async fn update_subscription_tier_handler(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<TierUpdateRequest>,
) -> AppResult<Json<Value>> {
    info!(
        admin_id = %admin.user_id(),
        target_email = %payload.email,
        tier = %payload.tier,
        "Updating subscription tier"
    );

    let result = app_state
        .translation_service
        .update_subscription_tier(payload)
        .await?;

    Ok(Json(result))
}

/// 自分のサブスクリプション
pub async fn get_my_subscription_handler(
    State(app_state): State<AppState>,
    VerifiedUser(user): VerifiedUser,
) -> Json<Value> {
    Json(
        app_state
            .translation_service
            .get_my_subscription(user.email())
            .await,
    )
}

/// 自分の翻訳履歴
pub async fn get_my_history_handler(
    State(app_state): State<AppState>,
    VerifiedUser(user): VerifiedUser,
    Query(query): Query<HistoryQuery>,
) -> Json<Value> {
    Json(
        app_state
            .translation_service
            .get_my_history(user.email(), query.limit, query.offset)
            .await,
    )
}

// --- Router Setup ---

/// サブスクリプション・翻訳履歴ルーター（全ルートJWT認証必須）
pub fn translation_router(app_state: AppState) -> Router {
    let auth_config = AuthMiddlewareConfig::new(app_state.jwt_manager.clone());

    Router::new()
        .route(
            "/admin/subscriptions",
            get(list_admin_subscriptions_handler),
        )
        .route("/admin/subscription", put(update_subscription_tier_handler))
        .route("/subscription", get(get_my_subscription_handler))
        .route("/history", get(get_my_history_handler))
        .route_layer(from_fn_with_state(auth_config, jwt_auth_middleware))
        .with_state(app_state)
}
