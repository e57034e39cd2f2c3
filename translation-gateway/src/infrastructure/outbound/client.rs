//! 外部サービス向けの薄いHTTPクライアント
//!
//! `reqwest::Client` を一度だけ構築して共有し、各リクエストに明示的なタイムアウトと
//! `outgoing_http` スパンを付与する。

use crate::config::GatewayConfig;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::Instrument;

/// 外部サービス呼び出しのエラー
#[derive(Error, Debug)]
pub enum RemoteError {
    /// 接続拒否・タイムアウト・DNSなどのネットワーク層の失敗
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 200以外のステータス
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
}

/// 受信済みのレスポンス
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    /// 外部サービスの成功判定は 200 のみ
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Result<Value, RemoteError> {
        serde_json::from_slice(&self.body).map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// 200 ならJSONを返し、それ以外はステータスと本文をエラーとして返す
    pub fn into_json(self) -> Result<Value, RemoteError> {
        if !self.is_ok() {
            return Err(RemoteError::Status {
                status: self.status.as_u16(),
                body: self.text(),
            });
        }
        self.json()
    }
}

#[derive(Clone, Debug)]
pub struct OutboundClient {
    inner: reqwest::Client,
}

impl OutboundClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, RemoteError> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for outbound requests");
        }

        let inner = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { inner })
    }

    pub fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    /// リクエストを送信し、本文まで読み込む
    pub async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<RemoteResponse, RemoteError> {
        let request = builder.timeout(timeout).build()?;

        let span = tracing::info_span!(
            "outgoing_http",
            http.method = %request.method(),
            http.url = %request.url(),
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        );

        async move {
            let response = self.inner.execute(request).await?;
            let status = response.status();
            tracing::Span::current().record("http.status_code", status.as_u16());

            let body = response.bytes().await?.to_vec();
            tracing::debug!(
                status = status.as_u16(),
                bytes = body.len(),
                "Outbound response received"
            );

            Ok(RemoteResponse { status, body })
        }
        .instrument(span)
        .await
    }
}

/// ベースURLにパスセグメントを追加する（各セグメントは必要に応じてエンコードされる）
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, RemoteError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RemoteError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
