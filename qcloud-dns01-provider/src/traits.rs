use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{NewRecord, Record, Zone};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码，如 `AuthFailure.SignatureFailure`
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// 域名（用于 `DomainNotFound` 等错误）
    pub domain: Option<String>,
}

/// 错误映射 Trait（内部使用）
/// 将原始 API 错误码映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    fn provider_name(&self) -> &'static str;

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Tencent Cloud DNS API operations used by the challenge flow.
///
/// `zone` arguments are zone names (`example.com`), as accepted by the API's
/// `Domain` parameter.
#[async_trait]
pub trait CnsApi: Send + Sync {
    /// All domains hosted in the account.
    async fn domain_list(&self) -> Result<Vec<Zone>>;

    /// All records of `zone`. An empty zone yields an empty list.
    async fn record_list(&self, zone: &str) -> Result<Vec<Record>>;

    /// Creates a record and returns its vendor-assigned ID.
    async fn record_create(&self, zone: &str, record: &NewRecord) -> Result<u64>;

    async fn record_delete(&self, zone: &str, record_id: u64) -> Result<()>;
}

/// Finds the authoritative zone of a name.
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    /// Returns the zone apex owning `fqdn`, as an FQDN (`example.com.`).
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String>;
}

/// ACME DNS-01 challenge provider
///
/// The ACME client calls [`present`](Self::present) before asking the CA to
/// validate, polls DNS using [`timeout`](Self::timeout), then calls
/// [`cleanup`](Self::cleanup).
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Publishes the TXT record for `key_auth` under `domain`.
    async fn present(&self, domain: &str, token: &str, key_auth: &str) -> Result<()>;

    /// Removes the TXT records published by [`present`](Self::present).
    async fn cleanup(&self, domain: &str, token: &str, key_auth: &str) -> Result<()>;

    /// `(propagation timeout, polling interval)` for the caller's DNS check.
    fn timeout(&self) -> (Duration, Duration);
}
