// src/api/dto/translation_dto.rs

use crate::domain::user_model::UserSummary;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

/// 料金プラン変更リクエスト
///
/// `tier` は文字列のまま受け取り、サービス層で許可値を検証する。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TierUpdateRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    pub tier: String,
}

/// 翻訳履歴のページングクエリ（範囲チェックは行わない）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,

    #[serde(default)]
    pub offset: i64,
}

pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

fn default_history_limit() -> i64 {
    DEFAULT_HISTORY_LIMIT
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
            offset: 0,
        }
    }
}

// --- Response DTOs ---

/// ローカルユーザーとリモートのサブスクリプションを結合したビュー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergedSubscriptionView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub profile_image_url: String,
    /// リモートに存在しない場合は null
    pub subscription: Option<Value>,
}

impl MergedSubscriptionView {
    pub fn new(user: UserSummary, subscription: Option<Value>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            profile_image_url: user.profile_image_url,
            subscription,
        }
    }
}

/// 翻訳履歴ページ（取得失敗時のフォールバック形）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryPage {
    pub success: bool,
    pub count: i64,
    pub total: i64,
    pub history: Vec<Value>,
}

impl HistoryPage {
    pub fn unavailable() -> Self {
        Self {
            success: false,
            count: 0,
            total: 0,
            history: Vec::new(),
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "success": self.success,
            "count": self.count,
            "total": self.total,
            "history": self.history,
        })
    }
}

/// 自分のサブスクリプションが取得できない場合の値
pub fn subscription_unavailable() -> Value {
    json!({ "documentTranslation": null })
}
