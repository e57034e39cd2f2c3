// src/service/translation_service.rs

use crate::api::dto::translation_dto::{
    subscription_unavailable, HistoryPage, MergedSubscriptionView, TierUpdateRequest,
};
use crate::domain::subscription_tier::SubscriptionTier;
use crate::domain::user_model::UserSummary;
use crate::error::{AppError, AppResult};
use crate::infrastructure::outbound::{HistoryClient, RemoteError, SubscriptionClient};
use crate::repository::user_repository::{UserDirectory, UserFilter};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// 管理画面の一覧で取得するユーザー数の上限
pub const ADMIN_LISTING_LIMIT: u64 = 1000;

/// ローカルのユーザー情報と外部サービスのサブスクリプション・翻訳履歴を集約する
#[derive(Clone)]
pub struct TranslationService {
    directory: Arc<dyn UserDirectory>,
    subscriptions: SubscriptionClient,
    history: HistoryClient,
}

impl TranslationService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        subscriptions: SubscriptionClient,
        history: HistoryClient,
    ) -> Self {
        Self {
            directory,
            subscriptions,
            history,
        }
    }

    /// 全ユーザーのサブスクリプション一覧（管理者用）
    ///
    /// サブスクリプションサービスが利用できない場合は全員 `subscription: null` で返す。
    pub async fn list_admin_subscriptions(&self) -> AppResult<Vec<MergedSubscriptionView>> {
        let page = self
            .directory
            .list_users(&UserFilter::default(), 0, ADMIN_LISTING_LIMIT)
            .await?;

        let subscriptions = match self.subscriptions.list_all().await {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "Failed to fetch subscriptions, continuing without them");
                HashMap::new()
            }
        };

        info!(
            users = page.users.len(),
            total_users = page.total,
            subscriptions = subscriptions.len(),
            "Merged admin subscription listing"
        );

        Ok(merge_subscriptions(page.users, &subscriptions))
    }

    /// 指定ユーザーの料金プランを変更（管理者用）
    pub async fn update_subscription_tier(&self, request: TierUpdateRequest) -> AppResult<Value> {
        request.validate()?;
        let tier: SubscriptionTier = request.tier.parse().map_err(AppError::ValidationError)?;

        match self.subscriptions.update_tier(&request.email, tier).await {
            Ok(payload) => {
                info!(email = %request.email, tier = %tier, "Subscription tier updated");
                Ok(payload)
            }
            Err(RemoteError::Status { status, body }) => {
                warn!(
                    email = %request.email,
                    status = status,
                    "Subscription service rejected tier update"
                );
                Err(AppError::Upstream { status, body })
            }
            Err(e) => {
                warn!(email = %request.email, error = %e, "Subscription service unreachable");
                Err(AppError::BadGateway(format!(
                    "Failed to update subscription: {}",
                    e
                )))
            }
        }
    }

    /// 呼び出し元ユーザー自身のサブスクリプション
    pub async fn get_my_subscription(&self, email: &str) -> Value {
        match self.subscriptions.get(email).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(email = %email, error = %e, "Failed to fetch subscription, using fallback");
                subscription_unavailable()
            }
        }
    }

    /// 呼び出し元ユーザー自身の翻訳履歴
    pub async fn get_my_history(&self, email: &str, limit: i64, offset: i64) -> Value {
        match self.history.history(email, limit, offset).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(email = %email, error = %e, "Failed to fetch translation history, using fallback");
                HistoryPage::unavailable().into_value()
            }
        }
    }
}

/// ユーザー一覧にメールアドレスでサブスクリプションを左結合する
///
/// 結果はユーザー一覧と同じ順序・同じ件数になり、ローカルに存在しないメールアドレスは含まれない。
pub fn merge_subscriptions(
    users: Vec<UserSummary>,
    subscriptions: &HashMap<String, Value>,
) -> Vec<MergedSubscriptionView> {
    users
        .into_iter()
        .map(|user| {
            let subscription = subscriptions.get(&user.email).cloned();
            MergedSubscriptionView::new(user, subscription)
        })
        .collect()
}
