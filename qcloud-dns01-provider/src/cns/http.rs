//! 腾讯云 API 请求

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::error::NO_DATA_OF_RECORD;
use super::types::{TencentError, TencentResponse};
use super::{CNS_API_HOST, CNS_VERSION, QcloudClient};

impl QcloudClient {
    /// 执行一次腾讯云 API 调用，返回 `Response` 中的业务数据
    ///
    /// 每次重试都重新签名，信封中的限频错误同样会重试。
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload =
            serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            })?;

        log::debug!(
            "[{}] {action} Request Body: {}",
            self.provider_name(),
            truncate_for_log(&payload)
        );

        let payload = &payload;
        let ctx = &ctx;
        let attempt = move || async move {
            let timestamp = Utc::now().timestamp();
            let authorization = self.sign(action, payload, timestamp);

            let request = self
                .client
                .post(format!("https://{CNS_API_HOST}"))
                .header("Content-Type", "application/json; charset=utf-8")
                .header("Host", CNS_API_HOST)
                .header("X-TC-Action", action)
                .header("X-TC-Version", CNS_VERSION)
                .header("X-TC-Timestamp", timestamp.to_string())
                .header("Authorization", authorization)
                .body(payload.clone());

            let (_status, response_text) =
                HttpUtils::execute_request(request, self.provider_name(), action).await?;

            self.decode_response(&response_text, ctx.clone())
        };

        HttpUtils::with_retry(self.provider_name(), action, self.max_retries, attempt).await
    }

    /// 解析响应信封：存在 `Error` 时映射为统一错误，否则解析业务数据
    pub(crate) fn decode_response<T: DeserializeOwned>(
        &self,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let envelope: TencentResponse = HttpUtils::parse_json(response_text, self.provider_name())?;

        if let Some(error) = envelope.response.get("Error") {
            let error: TencentError = serde_json::from_value(error.clone())
                .map_err(|e| self.parse_error(format!("Malformed error payload: {e}")))?;
            let mapped = self.map_error(
                RawApiError::with_code(error.code.clone(), error.message.clone()),
                ctx,
            );
            log::log!(
                api_error_log_level(&error.code, &mapped),
                "[{}] API error: {} - {}",
                self.provider_name(),
                error.code,
                error.message
            );
            return Err(mapped);
        }

        serde_json::from_value(envelope.response).map_err(|e| self.parse_error(e))
    }
}

/// 空记录列表属于正常应答，只记 debug；预期内的业务错误记 warn
fn api_error_log_level(code: &str, mapped: &ProviderError) -> log::Level {
    if code == NO_DATA_OF_RECORD {
        log::Level::Debug
    } else if mapped.is_expected() {
        log::Level::Warn
    } else {
        log::Level::Error
    }
}
