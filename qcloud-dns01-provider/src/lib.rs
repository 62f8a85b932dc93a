//! # qcloud-dns01-provider
//!
//! ACME DNS-01 challenge provider for Tencent Cloud DNS (qcloud CNS), using the
//! DNSPod API 3.0 with TC3-HMAC-SHA256 signing.
//!
//! The provider publishes `_acme-challenge.<domain>` TXT records before the CA
//! validates an order and removes them afterwards. Propagation checks are left
//! to the calling ACME client, which reads the wait parameters from
//! [`ChallengeProvider::timeout`].
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `QCLOUD_SECRET_ID` | required | API SecretId |
//! | `QCLOUD_SECRET_KEY` | required | API SecretKey |
//! | `QCLOUD_TTL` | `600` | TTL of the TXT record, seconds |
//! | `QCLOUD_PROPAGATION_TIMEOUT` | `60` | Propagation timeout, seconds |
//! | `QCLOUD_POLLING_INTERVAL` | `2` | Polling interval, seconds |
//! | `QCLOUD_HTTP_TIMEOUT` | `0` | HTTP request timeout, seconds (`0` = 30s default) |
//! | `QCLOUD_MAX_RETRIES` | `0` | Retries for network errors, timeouts and rate limits |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use qcloud_dns01_provider::{ChallengeProvider, QcloudDnsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = QcloudDnsProvider::from_env()?;
//!
//!     provider.present("*.example.com", "token", "token.thumbprint").await?;
//!     let (timeout, interval) = provider.timeout();
//!     // ... wait for propagation, let the CA validate ...
//!     provider.cleanup("*.example.com", "token", "token.thumbprint").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Failures
//! of vendor API calls made during `present`/`cleanup` are wrapped in
//! [`ProviderError::ApiCallFailed`], naming the API action that failed.

mod cns;
mod config;
pub mod dns01;
mod error;
mod http_client;
mod provider;
mod traits;
mod types;
mod utils;

/// Identifier used in logs and error messages.
pub const PROVIDER_NAME: &str = "qcloud";

pub use cns::{QcloudClient, QcloudClientBuilder};
pub use config::{
    Config, ConfigError, DEFAULT_TTL, ENV_HTTP_TIMEOUT, ENV_MAX_RETRIES, ENV_POLLING_INTERVAL,
    ENV_PROPAGATION_TIMEOUT, ENV_SECRET_ID, ENV_SECRET_KEY, ENV_TTL,
};
pub use error::{ProviderError, Result};
pub use provider::QcloudDnsProvider;
pub use traits::{ChallengeProvider, CnsApi, ZoneResolver};
pub use types::{DEFAULT_RECORD_LINE, NewRecord, Record, TXT_RECORD_TYPE, Zone};
