// src/domain/subscription_tier.rs

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// サブスクリプション階層（外部サブスクリプションサービスの料金プラン）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Standard,
    Plus,
    Pro,
}

impl SubscriptionTier {
    /// SubscriptionTierを文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Plus => "plus",
            Self::Pro => "pro",
        }
    }

    /// 全ての有効な階層を取得
    pub fn all() -> Vec<Self> {
        vec![Self::Standard, Self::Plus, Self::Pro]
    }

    /// エラーメッセージ用の許可値一覧
    pub fn allowed_values() -> String {
        Self::all()
            .iter()
            .map(|tier| tier.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for SubscriptionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "plus" => Ok(Self::Plus),
            "pro" => Ok(Self::Pro),
            _ => Err(format!(
                "Invalid tier. Allowed values: {}",
                Self::allowed_values()
            )),
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
