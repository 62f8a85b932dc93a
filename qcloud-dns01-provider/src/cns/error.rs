//! 腾讯云 DNS 错误码映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::QcloudClient;

/// 空记录列表时 `DescribeRecordList` 返回的错误码
pub(crate) const NO_DATA_OF_RECORD: &str = "ResourceNotFound.NoDataOfRecord";

/// 错误码参考: <https://cloud.tencent.com/document/api/1427/56192>
impl ProviderErrorMapper for QcloudClient {
    fn provider_name(&self) -> &'static str {
        crate::PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();

        match raw.code.as_deref() {
            // ============ 鉴权失败 ============
            Some(
                "AuthFailure"
                | "AuthFailure.InvalidAuthorization"
                | "AuthFailure.InvalidSecretId"
                | "AuthFailure.MFAFailure"
                | "AuthFailure.SecretIdNotFound"
                | "AuthFailure.SignatureExpire"
                | "AuthFailure.SignatureFailure"
                | "AuthFailure.TokenFailure"
                | "InvalidParameter.InvalidSecretId"
                | "InvalidParameter.InvalidSignature",
            ) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 配额用尽（不可重试） ============
            Some(
                "LimitExceeded"
                | "LimitExceeded.SubdomainLevelLimit"
                | "LimitExceeded.SubdomainRollLimit"
                | "RequestLimitExceeded.UinLimitExceeded"
                | "RequestLimitExceeded.IPLimitExceeded"
                | "RequestLimitExceeded.GlobalRegionUinLimitExceeded",
            ) => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 频率限制（可重试） ============
            Some(
                "RequestLimitExceeded"
                | "RequestLimitExceeded.RequestLimitExceeded"
                | "FailedOperation.FrequencyLimit"
                | "InvalidParameter.OperationIsTooFrequent",
            ) => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ============ 记录已存在 ============
            Some("InvalidParameter.DomainRecordExist") => ProviderError::RecordExists {
                provider,
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // ============ 记录不存在 ============
            Some("InvalidParameter.RecordIdInvalid" | "ResourceNotFound.NoDataOfRecordId") => {
                ProviderError::RecordNotFound {
                    provider,
                    record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 域名不存在 ============
            Some(
                "ResourceNotFound.NoDataOfDomain"
                | "InvalidParameterValue.DomainNotExists"
                | "InvalidParameter.DomainNotReged",
            ) => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // ============ 域名被锁定/封禁 ============
            Some(
                "FailedOperation.DomainIsLocked"
                | "FailedOperation.DomainIsSpam"
                | "FailedOperation.AccountIsLocked",
            ) => ProviderError::DomainLocked {
                provider,
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // ============ 无权限 ============
            Some(
                "UnauthorizedOperation"
                | "OperationDenied"
                | "OperationDenied.AccessDenied"
                | "OperationDenied.DomainOwnerAllowedOnly"
                | "OperationDenied.NoPermissionToOperateDomain"
                | "OperationDenied.NotGrantedByOwner"
                | "FailedOperation.NotDomainOwner"
                | "InvalidParameter.PermissionDenied",
            ) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 参数错误 ============
            Some("InvalidParameter.SubdomainInvalid" | "InvalidParameter.SubDomainInvalid") => {
                invalid_parameter(provider, "subdomain", raw.message)
            }
            Some(
                "InvalidParameter.RecordValueInvalid"
                | "InvalidParameter.RecordValueLengthInvalid"
                | "InvalidParameter.TxtValueInvalid",
            ) => invalid_parameter(provider, "value", raw.message),
            Some("InvalidParameter.RecordLineInvalid" | "InvalidParameter.LineNotExist") => {
                invalid_parameter(provider, "line", raw.message)
            }
            Some("LimitExceeded.RecordTtlLimit") => invalid_parameter(provider, "ttl", raw.message),
            Some(
                "InvalidParameter.DomainIdInvalid"
                | "InvalidParameter.DomainInvalid"
                | "InvalidParameter.DomainTooLong",
            ) => invalid_parameter(provider, "domain", raw.message),

            // ============ 其他 ============
            _ => self.unknown_error(raw),
        }
    }
}

fn invalid_parameter(provider: String, param: &str, detail: String) -> ProviderError {
    ProviderError::InvalidParameter {
        provider,
        param: param.to_string(),
        detail,
    }
}
