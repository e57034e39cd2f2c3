// src/infrastructure/outbound/subscription_client.rs

use super::client::{endpoint, OutboundClient, RemoteError};
use super::envelope::unwrap_envelope;
use crate::config::GatewayConfig;
use crate::domain::subscription_tier::SubscriptionTier;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::instrument;

/// 一括取得レスポンスの各要素
#[derive(Debug, Deserialize)]
struct SubscriptionEntry {
    email: String,
    subscription: Value,
}

/// サブスクリプションサービスのクライアント
#[derive(Clone, Debug)]
pub struct SubscriptionClient {
    client: OutboundClient,
    base_url: Url,
    timeout: Duration,
    bulk_timeout: Duration,
}

impl SubscriptionClient {
    pub fn new(client: OutboundClient, config: &GatewayConfig) -> Self {
        Self {
            client,
            base_url: config.subscription_base_url.clone(),
            timeout: config.request_timeout,
            bulk_timeout: config.bulk_request_timeout,
        }
    }

    /// 全ユーザーのサブスクリプションをメールアドレスをキーに取得
    #[instrument(
        name = "gateway.http.subscriptions.list_all",
        skip_all,
        fields(base = %self.base_url)
    )]
    pub async fn list_all(&self) -> Result<HashMap<String, Value>, RemoteError> {
        let url = endpoint(
            &self.base_url,
            &["api", "v1", "client", "subscriptions", "all"],
        )?;

        let payload = self
            .client
            .send(self.client.request(Method::GET, url), self.bulk_timeout)
            .await?
            .into_json()?;

        let entries: Vec<SubscriptionEntry> = serde_json::from_value(unwrap_envelope(payload))
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        // 同じメールアドレスが複数ある場合は後勝ち
        Ok(entries
            .into_iter()
            .map(|entry| (entry.email, entry.subscription))
            .collect())
    }

    /// 指定ユーザーの料金プランを変更
    #[instrument(
        name = "gateway.http.subscriptions.update_tier",
        skip_all,
        fields(base = %self.base_url, email = %email, tier = %tier)
    )]
    pub async fn update_tier(
        &self,
        email: &str,
        tier: SubscriptionTier,
    ) -> Result<Value, RemoteError> {
        let url = endpoint(
            &self.base_url,
            &["api", "v1", "client", "subscription", email, "tier"],
        )?;

        let request = self
            .client
            .request(Method::POST, url)
            .json(&json!({ "tier": tier }));

        let payload = self
            .client
            .send(request, self.timeout)
            .await?
            .into_json()?;

        Ok(unwrap_envelope(payload))
    }

    /// 指定ユーザーのサブスクリプションを取得
    #[instrument(
        name = "gateway.http.subscriptions.get",
        skip_all,
        fields(base = %self.base_url, email = %email)
    )]
    pub async fn get(&self, email: &str) -> Result<Value, RemoteError> {
        let url = endpoint(
            &self.base_url,
            &["api", "v1", "client", "subscription", email],
        )?;

        let payload = self
            .client
            .send(self.client.request(Method::GET, url), self.timeout)
            .await?
            .into_json()?;

        Ok(unwrap_envelope(payload))
    }
}
