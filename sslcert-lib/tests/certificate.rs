#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Accessor, validity and classification tests against the fixtures in
//! `tests/certs/` (generated with OpenSSL, signed by `ca.pem`).

use sslcert_lib::{Certificate, CertificateProperties, KeyAlgorithm};
use time::OffsetDateTime;

/// 2025-01-01T00:00:00Z
const EXAMPLE_NOT_BEFORE: i64 = 1735689600;
/// 2026-01-01T00:00:00Z
const EXAMPLE_NOT_AFTER: i64 = 1767225600;
const DAY: i64 = 86400;

fn load(name: &str) -> Certificate {
    let path = format!("{}/../tests/certs/{}", env!("CARGO_MANIFEST_DIR"), name);
    Certificate::from_file(&path).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

fn from_json(json: &str) -> Certificate {
    Certificate::from_properties(CertificateProperties::from_json(json).unwrap())
}

fn at(ts: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(ts).unwrap()
}

// ---- Accessors ----

#[test]
fn example_accessors() {
    let cert = load("example.pem");
    assert_eq!(cert.domain(), "example.com");
    assert_eq!(cert.issuer(), "ca.test");
    assert_eq!(cert.organization(), "Test Org");
    assert_eq!(cert.serial_number(), "10:00");
    assert_eq!(cert.signature_algorithm(), "RSA-SHA256");
    assert_eq!(cert.remote_address(), "");
    assert_eq!(
        cert.fingerprint(),
        "4A:D9:69:26:D1:DB:5E:2A:3D:79:38:F8:DC:0F:27:89:79:11:91:A2"
    );
    assert_eq!(
        cert.fingerprint_sha256(),
        "0F:90:77:9A:5D:52:79:4B:75:D1:83:39:B7:B3:7F:16:C4:7C:97:2E:9A:88:64:CF:EE:5A:2E:50:AD:69:3E:FA"
    );
}

#[test]
fn multi_valued_cn_uses_first_entry() {
    let cert = from_json(
        r#"{"fields": {
            "subject": {"components": [["CN", "a.example"], ["CN", "b.example"]]},
            "issuer": {"components": [["CN", "a.example"], ["CN", "z.example"]]}
        }}"#,
    );
    assert_eq!(cert.domain(), "a.example");
    assert_eq!(cert.issuer(), "a.example");
    assert_eq!(cert.domains(), ["a.example"]);
    assert!(cert.is_self_signed());
}

#[test]
fn self_signed_compares_first_cn_only() {
    let cert = from_json(
        r#"{"fields": {
            "subject": {"components": [["CN", "a.example"], ["CN", "shared.example"]]},
            "issuer": {"components": [["CN", "b.example"], ["CN", "shared.example"]]}
        }}"#,
    );
    assert_eq!(cert.domain(), "a.example");
    assert_eq!(cert.issuer(), "b.example");
    assert!(!cert.is_self_signed());
}

#[test]
fn organization_comes_from_issuer() {
    // Subject O is "Example Inc"; the accessor reports the issuing organization.
    let cert = load("example.pem");
    assert_eq!(cert.fields().subject.organization(), Some("Example Inc"));
    assert_eq!(cert.organization(), "Test Org");
}

#[test]
fn additional_domains_strip_dns_prefix() {
    let cert = load("example.pem");
    assert_eq!(cert.additional_domains(), ["example.com", "www.example.com"]);
}

#[test]
fn additional_domains_keep_non_dns_entries() {
    let cert = load("wildcard.pem");
    assert_eq!(
        cert.additional_domains(),
        ["*.example.com", "example.com", "IP Address:127.0.0.1"]
    );
}

#[test]
fn additional_domains_empty_without_san() {
    let cert = load("ca.pem");
    assert!(cert.additional_domains().is_empty());
    assert_eq!(cert.domains(), ["ca.test"]);
}

#[test]
fn domains_deduplicate_primary() {
    let cert = load("example.pem");
    assert_eq!(cert.domains(), ["example.com", "www.example.com"]);

    let cert = load("wildcard.pem");
    let domains = cert.domains();
    assert_eq!(
        domains,
        ["*.example.com", "example.com", "IP Address:127.0.0.1"]
    );
    assert_eq!(
        domains.iter().filter(|d| d.as_str() == "*.example.com").count(),
        1
    );
}

#[test]
fn public_key_rsa() {
    let cert = load("example.pem");
    assert_eq!(cert.public_key_algorithm(), KeyAlgorithm::Rsa);
    assert_eq!(cert.public_key_size(), 2048);
    assert_eq!(cert.public_key_info().curve, None);
}

#[test]
fn public_key_ec() {
    let cert = load("wildcard.pem");
    assert_eq!(cert.public_key_algorithm(), KeyAlgorithm::Ec);
    assert_eq!(cert.public_key_size(), 256);
    assert_eq!(cert.public_key_info().curve.as_deref(), Some("P-256"));
}

#[test]
fn validity_dates() {
    let cert = load("example.pem");
    assert_eq!(cert.valid_from_date(), at(EXAMPLE_NOT_BEFORE));
    assert_eq!(cert.expiration_date(), at(EXAMPLE_NOT_AFTER));
}

// ---- Validity & expiry ----

#[test]
fn expiry_boundary() {
    let cert = load("example.pem");
    assert!(!cert.is_expired_at(at(EXAMPLE_NOT_AFTER)));
    assert!(cert.is_expired_at(at(EXAMPLE_NOT_AFTER + 1)));
    assert!(!cert.is_expired_at(at(EXAMPLE_NOT_BEFORE - DAY)));
}

#[test]
fn validity_window_is_inclusive() {
    let cert = load("example.pem");
    assert!(!cert.is_valid_at(None, at(EXAMPLE_NOT_BEFORE - 1)));
    assert!(cert.is_valid_at(None, at(EXAMPLE_NOT_BEFORE)));
    assert!(cert.is_valid_at(None, at(EXAMPLE_NOT_AFTER)));
    assert!(!cert.is_valid_at(None, at(EXAMPLE_NOT_AFTER + 1)));
}

#[test]
fn validity_with_host() {
    let cert = load("example.pem");
    let now = at(EXAMPLE_NOT_BEFORE + 30 * DAY);
    assert!(cert.is_valid_at(Some("example.com"), now));
    assert!(cert.is_valid_at(Some("https://www.example.com/login"), now));
    assert!(!cert.is_valid_at(Some("example.org"), now));
    // An empty host means "no host given".
    assert!(cert.is_valid_at(Some(""), now));
    // Expired certificates are invalid for every host.
    assert!(!cert.is_valid_at(Some("example.com"), at(EXAMPLE_NOT_AFTER + 1)));
}

#[test]
fn valid_until_is_strict() {
    let cert = load("example.pem");
    let now = at(EXAMPLE_NOT_BEFORE + 150 * DAY);
    assert!(cert.is_valid_until_at(at(EXAMPLE_NOT_AFTER - 1), None, now));
    assert!(!cert.is_valid_until_at(at(EXAMPLE_NOT_AFTER), None, now));
    assert!(!cert.is_valid_until_at(at(EXAMPLE_NOT_AFTER + DAY), None, now));
}

#[test]
fn valid_until_requires_current_validity() {
    let cert = load("example.pem");
    // Not yet valid now, even though it outlives the threshold.
    let now = at(EXAMPLE_NOT_BEFORE - DAY);
    assert!(!cert.is_valid_until_at(at(EXAMPLE_NOT_BEFORE), None, now));
}

#[test]
fn valid_until_checks_host() {
    let cert = load("example.pem");
    let now = at(EXAMPLE_NOT_BEFORE + DAY);
    let threshold = at(EXAMPLE_NOT_BEFORE + 2 * DAY);
    assert!(cert.is_valid_until_at(threshold, Some("www.example.com"), now));
    assert!(!cert.is_valid_until_at(threshold, Some("api.example.com"), now));
}

#[test]
fn days_until_expiration_truncates() {
    let cert = load("example.pem");
    assert_eq!(cert.days_until_expiration_at(at(EXAMPLE_NOT_AFTER - 10 * DAY)), 10);
    assert_eq!(
        cert.days_until_expiration_at(at(EXAMPLE_NOT_AFTER - 10 * DAY + 1)),
        9
    );
    assert_eq!(cert.days_until_expiration_at(at(EXAMPLE_NOT_AFTER)), 0);
    assert_eq!(
        cert.days_until_expiration_at(at(EXAMPLE_NOT_AFTER + 3 * DAY)),
        -3
    );
}

#[test]
fn lifespan_in_days() {
    assert_eq!(load("example.pem").lifespan_in_days(), 365);
    assert_eq!(load("wildcard.pem").lifespan_in_days(), 92);
    // 2024-01-01 .. 2034-01-01 spans three leap days.
    assert_eq!(load("ca.pem").lifespan_in_days(), 3653);
}

// ---- Classification ----

#[test]
fn self_signed_detection() {
    assert!(load("ca.pem").is_self_signed());
    assert!(!load("example.pem").is_self_signed());
}

#[test]
fn weak_hash_detection() {
    let ca = load("ca.pem");
    assert_eq!(ca.signature_algorithm(), "RSA-SHA1");
    assert!(ca.uses_weak_hash());
    assert!(!load("example.pem").uses_weak_hash());
    assert!(!load("wildcard.pem").uses_weak_hash());
}

#[test]
fn precertificate_detection() {
    assert!(load("precert.pem").is_pre_certificate());
    assert!(!load("example.pem").is_pre_certificate());
    assert!(!load("ca.pem").is_pre_certificate());
}

#[test]
fn certificate_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Certificate>();
}
