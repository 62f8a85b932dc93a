//! Tencent Cloud DNS API wire types

use serde::{Deserialize, Serialize};

// ============ 通用响应结构 ============

/// Tencent Cloud response envelope; the payload is decoded once the error check passed.
#[derive(Debug, Deserialize)]
pub struct TencentResponse {
    #[serde(rename = "Response")]
    pub response: serde_json::Value,
}

/// Error payload nested inside `Response`.
#[derive(Debug, Deserialize)]
pub struct TencentError {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

// ============ 域名 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDomainListRequest {
    pub offset: u32,
    pub limit: u32,
}

/// Response payload for `DescribeDomainList`.
#[derive(Debug, Deserialize)]
pub struct DomainListResponse {
    #[serde(rename = "DomainList")]
    pub domain_list: Option<Vec<CnsDomain>>,
    #[serde(rename = "DomainCountInfo")]
    pub domain_count_info: Option<DomainCountInfo>,
}

#[derive(Debug, Deserialize)]
pub struct DomainCountInfo {
    #[serde(rename = "AllTotal")]
    pub all_total: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CnsDomain {
    #[serde(rename = "DomainId")]
    pub domain_id: u64,
    #[serde(rename = "Name")]
    pub name: String,
}

// ============ 记录 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeRecordListRequest {
    pub domain: String,
    pub offset: u32,
    pub limit: u32,
}

/// Response payload for `DescribeRecordList`.
#[derive(Debug, Deserialize)]
pub struct RecordListResponse {
    #[serde(rename = "RecordList")]
    pub record_list: Option<Vec<CnsRecord>>,
    #[serde(rename = "RecordCountInfo")]
    pub record_count_info: Option<RecordCountInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RecordCountInfo {
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CnsRecord {
    #[serde(rename = "RecordId")]
    pub record_id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Line", default)]
    pub line: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRecordRequest {
    pub domain: String,
    pub sub_domain: String,
    pub record_type: String,
    pub record_line: String,
    pub value: String,
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

/// Response payload for `CreateRecord`.
#[derive(Debug, Deserialize)]
pub struct CreateRecordResponse {
    #[serde(rename = "RecordId")]
    pub record_id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRecordRequest {
    pub domain: String,
    pub record_id: u64,
}

/// Response payload for `DeleteRecord` (only `RequestId`).
#[derive(Debug, Deserialize)]
pub struct DeleteRecordResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_api_field_names() {
        let req = CreateRecordRequest {
            domain: "example.com".to_string(),
            sub_domain: "_acme-challenge".to_string(),
            record_type: "TXT".to_string(),
            record_line: "默认".to_string(),
            value: "abc".to_string(),
            ttl: 600,
        };
        let json = serde_json::to_value(&req).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "Domain": "example.com",
                "SubDomain": "_acme-challenge",
                "RecordType": "TXT",
                "RecordLine": "默认",
                "Value": "abc",
                "TTL": 600
            })
        );
    }

    #[test]
    fn record_list_decodes_api_payload() {
        let body = r#"{
            "RecordCountInfo": {"SubdomainCount": 2, "ListCount": 2, "TotalCount": 2},
            "RecordList": [
                {"RecordId": 556507778, "Value": "f1g1ns1.dnspod.net.", "Status": "ENABLE",
                 "UpdatedOn": "2021-03-28 11:27:09", "Name": "@", "Line": "默认",
                 "LineId": "0", "Type": "NS", "MonitorStatus": "", "Remark": "",
                 "TTL": 86400, "MX": 0},
                {"RecordId": 556507779, "Value": "token", "Status": "ENABLE",
                 "Name": "_acme-challenge", "Line": "默认", "Type": "TXT", "TTL": 600}
            ]
        }"#;
        let parsed: RecordListResponse =
            serde_json::from_str(body).unwrap_or_else(|e| panic!("should decode: {e}"));
        let records = parsed.record_list.unwrap_or_default();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].record_id, 556_507_779);
        assert_eq!(records[1].record_type, "TXT");
        assert_eq!(
            parsed.record_count_info.and_then(|c| c.total_count),
            Some(2)
        );
    }
}
