//! Authoritative zone lookup via SOA queries.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;

use crate::PROVIDER_NAME;
use crate::error::{ProviderError, Result};
use crate::traits::ZoneResolver;

use super::{domain_suffixes, to_fqdn, un_fqdn};

/// Finds the zone of a name by walking its suffixes and asking for SOA records.
///
/// The first suffix that owns an SOA record in the answer section is the zone.
pub struct SoaZoneResolver {
    resolver: TokioResolver,
}

impl SoaZoneResolver {
    /// Uses the system resolver configuration, falling back to the built-in
    /// defaults when it cannot be read.
    pub fn system() -> Self {
        let builder = TokioResolver::builder_tokio().unwrap_or_else(|e| {
            log::warn!("Cannot read system resolver config, using defaults: {e}");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        });
        Self {
            resolver: builder.build(),
        }
    }

    /// Queries only the given nameservers (plain UDP/TCP on port 53).
    pub fn with_nameservers(nameservers: &[IpAddr]) -> Self {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(nameservers, 53, true),
        );
        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(ResolverOpts::default())
                .build();
        Self { resolver }
    }

    /// Whether `candidate` owns an SOA record.
    async fn owns_soa(&self, candidate: &str) -> std::result::Result<bool, String> {
        let lookup = self
            .resolver
            .soa_lookup(candidate)
            .await
            .map_err(|e| e.to_string())?;

        Ok(lookup.as_lookup().record_iter().any(|record| {
            record.record_type() == RecordType::SOA
                && to_fqdn(&record.name().to_string()).eq_ignore_ascii_case(candidate)
        }))
    }
}

#[async_trait]
impl ZoneResolver for SoaZoneResolver {
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String> {
        let mut last_error = None;

        for candidate in domain_suffixes(fqdn) {
            match self.owns_soa(&candidate).await {
                Ok(true) => {
                    log::debug!("[{PROVIDER_NAME}] Zone of {fqdn} is {candidate}");
                    return Ok(candidate);
                }
                Ok(false) => {}
                // NXDOMAIN / NoData 说明不是区域顶点，继续向上查找
                Err(e) => last_error = Some(e),
            }
        }

        Err(ProviderError::ZoneLookupFailed {
            provider: PROVIDER_NAME.to_string(),
            fqdn: fqdn.to_string(),
            detail: last_error.unwrap_or_else(|| "no SOA record found".to_string()),
        })
    }
}

/// Resolves every name to one configured zone, without DNS queries.
///
/// For setups where the zone is known up front, or DNS is split-horizon.
#[derive(Debug, Clone)]
pub struct FixedZoneResolver {
    zone: String,
}

impl FixedZoneResolver {
    pub fn new(zone: &str) -> Self {
        Self {
            zone: to_fqdn(zone).to_ascii_lowercase(),
        }
    }
}

#[async_trait]
impl ZoneResolver for FixedZoneResolver {
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String> {
        let name = to_fqdn(fqdn).to_ascii_lowercase();
        let zone = un_fqdn(&self.zone);
        if name == self.zone || name.ends_with(&format!(".{zone}.")) {
            Ok(self.zone.clone())
        } else {
            Err(ProviderError::ZoneLookupFailed {
                provider: PROVIDER_NAME.to_string(),
                fqdn: fqdn.to_string(),
                detail: format!("name is outside the configured zone {}", self.zone),
            })
        }
    }
}
