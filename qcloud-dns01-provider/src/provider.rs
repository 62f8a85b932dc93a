//! Tencent Cloud DNS-01 challenge provider

use std::time::Duration;

use async_trait::async_trait;

use crate::PROVIDER_NAME;
use crate::cns::QcloudClient;
use crate::config::Config;
use crate::dns01::{
    SoaZoneResolver, extract_record_name, get_record, strip_wildcard, to_fqdn, un_fqdn,
};
use crate::error::{ProviderError, Result};
use crate::traits::{ChallengeProvider, CnsApi, ZoneResolver};
use crate::types::{NewRecord, Record, Zone};

/// DNS-01 challenge provider backed by Tencent Cloud DNS.
///
/// `C` talks to the vendor API and `R` finds the authoritative zone of a
/// name; both default to the real implementations.
pub struct QcloudDnsProvider<C = QcloudClient, R = SoaZoneResolver> {
    config: Config,
    client: C,
    resolver: R,
}

impl QcloudDnsProvider {
    /// Provider configured from `QCLOUD_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Provider using the system DNS resolver for zone lookups.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_resolver(config, SoaZoneResolver::system())
    }
}

impl<R: ZoneResolver> QcloudDnsProvider<QcloudClient, R> {
    /// Provider with a custom zone resolver.
    pub fn with_resolver(config: Config, resolver: R) -> Result<Self> {
        config.validate()?;
        let client = QcloudClient::builder(config.secret_id.clone(), config.secret_key.clone())
            .max_retries(config.max_retries)
            .http_timeout(config.http_timeout)
            .build()?;
        Ok(Self::with_parts(config, client, resolver))
    }
}

impl<C: CnsApi, R: ZoneResolver> QcloudDnsProvider<C, R> {
    /// Assembles a provider from explicit parts.
    pub fn with_parts(config: Config, client: C, resolver: R) -> Self {
        Self {
            config,
            client,
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The vendor API client.
    pub fn api(&self) -> &C {
        &self.client
    }

    /// Finds the hosted zone serving `domain`.
    ///
    /// The zone is the account domain whose name equals the authoritative
    /// zone found in DNS.
    pub async fn hosted_zone(&self, domain: &str) -> Result<Zone> {
        let zones = self
            .client
            .domain_list()
            .await
            .map_err(|e| e.in_api_call(PROVIDER_NAME, "DescribeDomainList"))?;

        let auth_zone = self.resolver.find_zone_by_fqdn(&to_fqdn(domain)).await?;
        let auth_zone = un_fqdn(&auth_zone);

        zones
            .into_iter()
            .find(|zone| zone.name.eq_ignore_ascii_case(auth_zone))
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: PROVIDER_NAME.to_string(),
                domain: domain.to_string(),
                raw_message: Some(format!("zone {auth_zone} is not hosted in this account")),
            })
    }

    /// TXT records named `record_name` in `zone`.
    async fn find_txt_records(&self, zone: &Zone, record_name: &str) -> Result<Vec<Record>> {
        let records = self
            .client
            .record_list(&zone.name)
            .await
            .map_err(|e| e.in_api_call(PROVIDER_NAME, "DescribeRecordList"))?;

        Ok(records
            .into_iter()
            .filter(|record| record.is_txt_named(record_name))
            .collect())
    }
}

#[async_trait]
impl<C: CnsApi, R: ZoneResolver> ChallengeProvider for QcloudDnsProvider<C, R> {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn present(&self, domain: &str, _token: &str, key_auth: &str) -> Result<()> {
        let domain = strip_wildcard(domain);
        let (fqdn, value) = get_record(domain, key_auth);
        let zone = self.hosted_zone(domain).await?;

        let record_name = extract_record_name(&fqdn, &zone.name);
        let record = NewRecord::txt(record_name, value, self.config.ttl);

        let record_id = self
            .client
            .record_create(&zone.name, &record)
            .await
            .map_err(|e| e.in_api_call(PROVIDER_NAME, "CreateRecord"))?;

        log::info!(
            "[{PROVIDER_NAME}] Created TXT record {} in {} (id {record_id})",
            record.name,
            zone.name
        );
        Ok(())
    }

    async fn cleanup(&self, domain: &str, _token: &str, key_auth: &str) -> Result<()> {
        let domain = strip_wildcard(domain);
        let (fqdn, _) = get_record(domain, key_auth);
        let zone = self.hosted_zone(domain).await?;

        let record_name = extract_record_name(&fqdn, &zone.name);
        let records = self.find_txt_records(&zone, &record_name).await?;

        if records.is_empty() {
            log::warn!(
                "[{PROVIDER_NAME}] No TXT record {record_name} found in {}, nothing to clean up",
                zone.name
            );
        }

        for record in records {
            self.client
                .record_delete(&zone.name, record.id)
                .await
                .map_err(|e| e.in_api_call(PROVIDER_NAME, "DeleteRecord"))?;
            log::info!(
                "[{PROVIDER_NAME}] Deleted TXT record {} in {} (id {})",
                record.name,
                zone.name,
                record.id
            );
        }

        Ok(())
    }

    fn timeout(&self) -> (Duration, Duration) {
        (self.config.propagation_timeout, self.config.polling_interval)
    }
}
