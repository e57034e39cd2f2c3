// src/config/gateway.rs

use super::app::ConfigError;
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_SUBSCRIPTION_SERVICE_URL: &str = "http://dev-test.kness.team/kness-app-api";
pub const DEFAULT_HISTORY_SERVICE_URL: &str = "http://dev-test.kness.team/open_web_ui_api";

/// 外部サービス（サブスクリプション / 翻訳履歴）への接続設定
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub subscription_base_url: Url,
    pub history_base_url: Url,
    /// trueの場合のみ証明書検証を無効化する（旧環境との互換用）
    pub accept_invalid_certs: bool,
    /// 単一レコード取得・更新のタイムアウト
    pub request_timeout: Duration,
    /// 管理者向け一括取得のタイムアウト
    pub bulk_request_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let subscription_base_url = parse_base_url(
            "SUBSCRIPTION_SERVICE_URL",
            &env::var("SUBSCRIPTION_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SUBSCRIPTION_SERVICE_URL.to_string()),
        )?;
        let history_base_url = parse_base_url(
            "HISTORY_SERVICE_URL",
            &env::var("HISTORY_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_HISTORY_SERVICE_URL.to_string()),
        )?;

        let accept_invalid_certs = match env::var("OUTBOUND_TLS_INSECURE") {
            Ok(value) => parse_bool("OUTBOUND_TLS_INSECURE", &value)?,
            Err(_) => false,
        };

        Ok(Self {
            subscription_base_url,
            history_base_url,
            accept_invalid_certs,
            request_timeout: parse_secs("OUTBOUND_TIMEOUT_SECS", 10)?,
            bulk_request_timeout: parse_secs("OUTBOUND_BULK_TIMEOUT_SECS", 15)?,
        })
    }

    /// テストや手動構成用：任意のベースURLで構築
    pub fn with_base_urls(subscription_base_url: Url, history_base_url: Url) -> Self {
        Self {
            subscription_base_url,
            history_base_url,
            accept_invalid_certs: false,
            request_timeout: Duration::from_secs(10),
            bulk_request_timeout: Duration::from_secs(15),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::with_base_urls(
            Url::parse(DEFAULT_SUBSCRIPTION_SERVICE_URL).expect("default subscription URL is valid"),
            Url::parse(DEFAULT_HISTORY_SERVICE_URL).expect("default history URL is valid"),
        )
    }
}

/// 絶対URL（http/https）のみ許可
pub fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::Invalid(format!("{} is not a valid URL: {}", name, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::Invalid(format!(
                "{} must use http or https, got '{}'",
                name, other
            )))
        }
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid(format!(
            "{} cannot be used as a base URL",
            name
        )));
    }

    Ok(url)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid(format!(
            "{} must be a boolean, got '{}'",
            name, raw
        ))),
    }
}

fn parse_secs(name: &str, default: u64) -> Result<Duration, ConfigError> {
    let secs = match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {} value", name)))?,
        Err(_) => default,
    };

    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{} must be positive", name)));
    }

    Ok(Duration::from_secs(secs))
}
