//! TC3-HMAC-SHA256 请求签名

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::{CNS_API_HOST, CNS_SERVICE, QcloudClient};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC 接受任意长度的 key，new_from_slice 不会失败
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC accepts keys of any length")
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

impl QcloudClient {
    /// 生成 `Authorization` 头
    ///
    /// 签名覆盖 `content-type`、`host`、`x-tc-action` 三个头以及请求体；
    /// 凭证范围中的日期取 `timestamp` 对应的 UTC 日期。
    pub(crate) fn sign(&self, action: &str, payload: &str, timestamp: i64) -> String {
        let date = DateTime::from_timestamp(timestamp, 0)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%d")
            .to_string();

        // 1. 规范请求串
        let canonical_headers = format!(
            "content-type:application/json; charset=utf-8\nhost:{CNS_API_HOST}\nx-tc-action:{}\n",
            action.to_lowercase()
        );
        let hashed_payload = hex::encode(Sha256::digest(payload.as_bytes()));
        let canonical_request =
            format!("POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{hashed_payload}");

        // 2. 待签名字符串
        let credential_scope = format!("{date}/{CNS_SERVICE}/tc3_request");
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign =
            format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{hashed_canonical_request}");

        // 3. 派生签名密钥并计算签名
        let secret_date = hmac_sha256(
            format!("TC3{}", self.secret_key).as_bytes(),
            date.as_bytes(),
        );
        let secret_service = hmac_sha256(&secret_date, CNS_SERVICE.as_bytes());
        let secret_signing = hmac_sha256(&secret_service, b"tc3_request");
        let signature = hex::encode(hmac_sha256(&secret_signing, string_to_sign.as_bytes()));

        format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.secret_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::QcloudClient;
    use super::hmac_sha256;

    fn client(secret_key: &str) -> QcloudClient {
        QcloudClient::new("AKIDtest".to_string(), secret_key.to_string())
            .unwrap_or_else(|e| panic!("client should build: {e}"))
    }

    fn signature_of(authorization: &str) -> &str {
        authorization.rsplit("Signature=").next().unwrap_or_default()
    }

    // ---- RFC 4231 test case 2 ----

    #[test]
    fn hmac_matches_rfc4231_vector() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn authorization_has_expected_shape() {
        // 1705305600 = 2024-01-15 08:00:00 UTC
        let auth = client("secret").sign("CreateRecord", "{}", 1_705_305_600);

        assert!(auth.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDtest/2024-01-15/dnspod/tc3_request, \
             SignedHeaders=content-type;host;x-tc-action, Signature="
        ));
        let signature = signature_of(&auth);
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_matches_known_value() {
        let auth = client("secret").sign("CreateRecord", r#"{"Domain":"example.com"}"#, 1_705_305_600);
        assert_eq!(
            signature_of(&auth),
            "60a2acd5db6ae4e43550bcd715bd7dbb96f34c32482efd594952f8b10856f344"
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let c = client("secret");
        let payload = r#"{"Domain":"example.com"}"#;
        assert_eq!(
            c.sign("DescribeRecordList", payload, 1_705_305_600),
            c.sign("DescribeRecordList", payload, 1_705_305_600)
        );
    }

    #[test]
    fn signature_covers_action_payload_and_key() {
        let c = client("secret");
        let base = c.sign("CreateRecord", r#"{"Domain":"a.com"}"#, 1_705_305_600);
        let other_action = c.sign("DeleteRecord", r#"{"Domain":"a.com"}"#, 1_705_305_600);
        let other_payload = c.sign("CreateRecord", r#"{"Domain":"b.com"}"#, 1_705_305_600);
        let other_key = client("another").sign("CreateRecord", r#"{"Domain":"a.com"}"#, 1_705_305_600);

        assert_ne!(signature_of(&base), signature_of(&other_action));
        assert_ne!(signature_of(&base), signature_of(&other_payload));
        assert_ne!(signature_of(&base), signature_of(&other_key));
    }

    #[test]
    fn credential_date_follows_utc_day() {
        let c = client("secret");
        // 2024-01-15 23:59:59 UTC 与 2024-01-16 00:00:00 UTC
        let late = c.sign("CreateRecord", "{}", 1_705_363_199);
        let next = c.sign("CreateRecord", "{}", 1_705_363_200);
        assert!(late.contains("/2024-01-15/dnspod/"));
        assert!(next.contains("/2024-01-16/dnspod/"));
    }
}
