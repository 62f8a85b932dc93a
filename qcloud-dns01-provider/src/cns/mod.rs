//! 腾讯云 DNS（DNSPod API 3.0）客户端

mod api;
mod error;
mod http;
mod sign;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::create_http_client;

pub(crate) const CNS_API_HOST: &str = "dnspod.tencentcloudapi.com";
pub(crate) const CNS_SERVICE: &str = "dnspod";
pub(crate) const CNS_VERSION: &str = "2021-03-23";
/// 列表接口单页最大条数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Signed client for the Tencent Cloud DNS API.
pub struct QcloudClient {
    pub(crate) client: Client,
    pub(crate) secret_id: String,
    pub(crate) secret_key: String,
    pub(crate) max_retries: u32,
}

/// [`QcloudClient`] Builder
pub struct QcloudClientBuilder {
    secret_id: String,
    secret_key: String,
    max_retries: u32,
    http_timeout: Option<Duration>,
}

impl QcloudClientBuilder {
    fn new(secret_id: String, secret_key: String) -> Self {
        Self {
            secret_id,
            secret_key,
            max_retries: 0,
            http_timeout: None,
        }
    }

    /// Retries for network errors, timeouts and rate limits (default 0).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Per-request timeout; `None` keeps the 30s default.
    pub fn http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<QcloudClient> {
        Ok(QcloudClient {
            client: create_http_client(self.http_timeout, crate::PROVIDER_NAME)?,
            secret_id: self.secret_id,
            secret_key: self.secret_key,
            max_retries: self.max_retries,
        })
    }
}

impl QcloudClient {
    pub fn new(secret_id: String, secret_key: String) -> Result<Self> {
        Self::builder(secret_id, secret_key).build()
    }

    pub fn builder(secret_id: String, secret_key: String) -> QcloudClientBuilder {
        QcloudClientBuilder::new(secret_id, secret_key)
    }
}
