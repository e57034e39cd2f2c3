// src/infrastructure/outbound/history_client.rs

use super::client::{endpoint, OutboundClient, RemoteError};
use crate::config::GatewayConfig;
use reqwest::{Method, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// 翻訳履歴（キャッシュ）サービスのクライアント
#[derive(Clone, Debug)]
pub struct HistoryClient {
    client: OutboundClient,
    base_url: Url,
    timeout: Duration,
}

impl HistoryClient {
    pub fn new(client: OutboundClient, config: &GatewayConfig) -> Self {
        Self {
            client,
            base_url: config.history_base_url.clone(),
            timeout: config.request_timeout,
        }
    }

    /// 指定ユーザーの翻訳履歴を取得（レスポンス本文はそのまま返す）
    #[instrument(
        name = "gateway.http.history.list",
        skip_all,
        fields(base = %self.base_url, email = %email, limit = limit, offset = offset)
    )]
    pub async fn history(&self, email: &str, limit: i64, offset: i64) -> Result<Value, RemoteError> {
        let url = endpoint(&self.base_url, &["deepl", "cache", "history"])?;

        let request = self.client.request(Method::GET, url).query(&[
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("email", email.to_string()),
        ]);

        self.client.send(request, self.timeout).await?.into_json()
    }
}
