//! Vendor-neutral view of the Tencent Cloud DNS data the challenge flow touches.

use serde::{Deserialize, Serialize};

/// Record line used for every challenge record ("default" line).
pub const DEFAULT_RECORD_LINE: &str = "默认";

/// TXT record type as spelled by the API.
pub const TXT_RECORD_TYPE: &str = "TXT";

/// A hosted zone (domain) in the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Vendor-assigned domain ID.
    pub id: u64,
    /// Zone apex without trailing dot, e.g. `example.com`.
    pub name: String,
}

/// A DNS record as returned by the record list API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Vendor-assigned record ID.
    pub id: u64,
    /// Host label relative to the zone (`@` for the apex).
    pub name: String,
    /// Record type, upper case (`TXT`, `A`, ...).
    pub record_type: String,
    pub value: String,
    pub line: String,
    pub ttl: u32,
}

impl Record {
    /// Whether this is a TXT record with the given relative name.
    ///
    /// DNS names compare case-insensitively.
    pub fn is_txt_named(&self, name: &str) -> bool {
        self.record_type.eq_ignore_ascii_case(TXT_RECORD_TYPE)
            && self.name.eq_ignore_ascii_case(name)
    }
}

/// Attributes of a record to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Host label relative to the zone.
    pub name: String,
    pub record_type: String,
    pub value: String,
    pub line: String,
    pub ttl: u32,
}

impl NewRecord {
    /// A TXT record on the default line.
    pub fn txt(name: impl Into<String>, value: impl Into<String>, ttl: u32) -> Self {
        Self {
            name: name.into(),
            record_type: TXT_RECORD_TYPE.to_string(),
            value: value.into(),
            line: DEFAULT_RECORD_LINE.to_string(),
            ttl,
        }
    }
}
