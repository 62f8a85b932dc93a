//! DNS-01 challenge helpers: record name and value, FQDN handling, zone lookup.

mod resolver;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

pub use resolver::{FixedZoneResolver, SoaZoneResolver};

/// Label prepended to the validated domain (RFC 8555 §8.4).
pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Default time the caller waits for the TXT record to propagate.
pub const DEFAULT_PROPAGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Default delay between the caller's propagation checks.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(2);

/// Appends the root dot if `name` lacks one.
pub fn to_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Removes one trailing root dot.
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Returns the challenge record FQDN and TXT value for `domain` and `key_auth`.
///
/// The value is the unpadded base64url SHA-256 digest of the key authorization.
pub fn get_record(domain: &str, key_auth: &str) -> (String, String) {
    let fqdn = format!("{ACME_CHALLENGE_LABEL}.{}", to_fqdn(domain));
    let value = URL_SAFE_NO_PAD.encode(Sha256::digest(key_auth.as_bytes()));
    (fqdn, value)
}

/// Drops a leading `*.` so wildcard orders validate on the base domain.
///
/// The API rejects `_acme-challenge.*` as a sub domain
/// (`InvalidParameter.SubDomainInvalid`), and the CA expects the record on
/// the base name anyway.
pub fn strip_wildcard(domain: &str) -> &str {
    domain.strip_prefix("*.").unwrap_or(domain)
}

/// Derives the record name relative to `zone` from a full `fqdn`.
///
/// `_acme-challenge.www.example.com.` in `example.com` → `_acme-challenge.www`.
/// A name equal to the zone yields `@`; a name outside the zone is returned
/// without its trailing dot.
pub fn extract_record_name(fqdn: &str, zone: &str) -> String {
    let name = un_fqdn(fqdn);
    let zone = un_fqdn(zone);

    if name.eq_ignore_ascii_case(zone) {
        return "@".to_string();
    }

    let suffix_start = name.len().checked_sub(zone.len() + 1);
    match suffix_start {
        Some(idx)
            if name.as_bytes()[idx] == b'.'
                && name[idx + 1..].eq_ignore_ascii_case(zone) =>
        {
            name[..idx].to_string()
        }
        _ => name.to_string(),
    }
}

/// Every suffix of `fqdn` that is itself a domain, longest first, each with a trailing dot.
///
/// `a.example.com.` → `a.example.com.`, `example.com.`, `com.`
pub(crate) fn domain_suffixes(fqdn: &str) -> Vec<String> {
    let name = un_fqdn(fqdn);
    if name.is_empty() {
        return Vec::new();
    }
    let labels: Vec<&str> = name.split('.').collect();
    (0..labels.len())
        .map(|i| to_fqdn(&labels[i..].join(".")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqdn_round_trip_is_idempotent() {
        assert_eq!(to_fqdn("example.com"), "example.com.");
        assert_eq!(to_fqdn("example.com."), "example.com.");
        assert_eq!(un_fqdn("example.com."), "example.com");
        assert_eq!(un_fqdn("example.com"), "example.com");
    }

    #[test]
    fn get_record_builds_challenge_name_and_digest() {
        let (fqdn, value) = get_record("example.com", "123d==");
        assert_eq!(fqdn, "_acme-challenge.example.com.");
        assert_eq!(value, "ADw2sEd82DUgXcQ9hNBZThJs7zVJkR5v9JeSbAb9mZY");
    }

    #[test]
    fn get_record_accepts_fqdn_domain() {
        let (fqdn, value) = get_record("www.example.com.", "token.thumbprint");
        assert_eq!(fqdn, "_acme-challenge.www.example.com.");
        assert_eq!(value, "61rBZ_4knHblO0MNoxFsXZ_eTFUHum0B6IVRbhvUn5I");
    }

    #[test]
    fn wildcard_prefix_is_stripped_once() {
        assert_eq!(strip_wildcard("*.example.com"), "example.com");
        assert_eq!(strip_wildcard("*.*.example.com"), "*.example.com");
        assert_eq!(strip_wildcard("example.com"), "example.com");
        assert_eq!(strip_wildcard("*"), "*");
        assert_eq!(strip_wildcard(""), "");
    }

    #[test]
    fn record_name_for_apex_domain() {
        assert_eq!(
            extract_record_name("_acme-challenge.example.com.", "example.com"),
            "_acme-challenge"
        );
    }

    #[test]
    fn record_name_for_subdomain() {
        assert_eq!(
            extract_record_name("_acme-challenge.a.b.example.com.", "example.com."),
            "_acme-challenge.a.b"
        );
    }

    #[test]
    fn record_name_ignores_zone_case() {
        assert_eq!(
            extract_record_name("_acme-challenge.WWW.Example.COM.", "example.com"),
            "_acme-challenge.WWW"
        );
    }

    #[test]
    fn record_name_requires_label_boundary() {
        // "badexample.com" 不属于 "example.com"
        assert_eq!(
            extract_record_name("_acme-challenge.badexample.com.", "example.com"),
            "_acme-challenge.badexample.com"
        );
    }

    #[test]
    fn record_name_only_strips_trailing_zone() {
        assert_eq!(
            extract_record_name("_acme-challenge.example.com.example.com.", "example.com"),
            "_acme-challenge.example.com"
        );
    }

    #[test]
    fn record_name_outside_zone_is_unchanged() {
        assert_eq!(
            extract_record_name("_acme-challenge.example.org.", "example.com"),
            "_acme-challenge.example.org"
        );
    }

    #[test]
    fn record_name_equal_to_zone_is_apex() {
        assert_eq!(extract_record_name("example.com.", "example.com"), "@");
    }

    #[test]
    fn suffixes_walk_toward_tld() {
        assert_eq!(
            domain_suffixes("_acme-challenge.www.example.com."),
            vec![
                "_acme-challenge.www.example.com.",
                "www.example.com.",
                "example.com.",
                "com.",
            ]
        );
        assert!(domain_suffixes(".").is_empty());
    }
}
