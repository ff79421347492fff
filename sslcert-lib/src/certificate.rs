//! The certificate value object: accessors, validity and matching.

use crate::convert;
use crate::decoder;
use crate::downloader::Downloader;
use crate::fields::{
    CertificateFields, KeyAlgorithm, PublicKeyInfo, EXT_KEY_CT_POISON, EXT_KEY_SUBJECT_ALT_NAME,
};
use crate::fingerprint::DigestAlgorithm;
use crate::matcher;
use crate::properties::CertificateProperties;
use crate::SslCertError;
use digest::Digest;
use std::path::Path;
use time::OffsetDateTime;

/// An immutable, decoded X.509 certificate.
///
/// Constructing a `Certificate` never validates it: expired or mismatched
/// certificates are representable and only rejected by the query methods.
///
/// Equality covers the certificate content only: two values that differ
/// just in `remote_address` compare equal.
#[derive(Debug, Clone)]
pub struct Certificate {
    fields: CertificateFields,
    fingerprint: String,
    fingerprint_sha256: String,
    remote_address: String,
    public_key_info: PublicKeyInfo,
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
            && self.fingerprint == other.fingerprint
            && self.fingerprint_sha256 == other.fingerprint_sha256
            && self.public_key_info == other.public_key_info
    }
}

impl Certificate {
    /// Build a certificate from already decoded parts.
    pub fn new(
        fields: CertificateFields,
        fingerprint: impl Into<String>,
        fingerprint_sha256: impl Into<String>,
        remote_address: impl Into<String>,
        public_key_info: PublicKeyInfo,
    ) -> Self {
        Self {
            fields,
            fingerprint: fingerprint.into(),
            fingerprint_sha256: fingerprint_sha256.into(),
            remote_address: remote_address.into(),
            public_key_info,
        }
    }

    /// Rebuild a certificate from its property bag.
    pub fn from_properties(properties: CertificateProperties) -> Self {
        Self {
            fields: properties.fields,
            fingerprint: properties.fingerprint,
            fingerprint_sha256: properties.fingerprint_sha256,
            remote_address: properties.remote_address,
            public_key_info: properties.public_key_info,
        }
    }

    /// Decode a certificate from PEM or DER bytes.
    ///
    /// Input without a `-----BEGIN CERTIFICATE-----` header is treated as DER.
    pub fn from_bytes(input: &[u8]) -> Result<Self, SslCertError> {
        Self::decode(input, String::new())
    }

    /// Decode a certificate from a PEM string (or DER bytes held in a string).
    pub fn from_string(input: &str) -> Result<Self, SslCertError> {
        Self::from_bytes(input.as_bytes())
    }

    /// Read and decode a PEM or DER certificate file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SslCertError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Fetch the leaf certificate of `host` with default connection settings.
    ///
    /// `host` may be a bare hostname, an IP address or a URL. Use
    /// [`Downloader`] to change port, timeout or verification.
    pub fn from_host(host: &str) -> Result<Self, SslCertError> {
        Downloader::new().for_host(host)
    }

    pub(crate) fn decode(input: &[u8], remote_address: String) -> Result<Self, SslCertError> {
        if input.is_empty() {
            return Err(SslCertError::ParseError("empty input".into()));
        }

        let pem = convert::ensure_pem(input);
        let decoded = decoder::decode_pem(&pem)?;

        Ok(Self {
            fingerprint: decoded.fingerprint(DigestAlgorithm::Sha1),
            fingerprint_sha256: decoded.fingerprint(DigestAlgorithm::Sha256),
            fields: decoded.fields,
            remote_address,
            public_key_info: decoded.public_key_info,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The decoded field mapping.
    pub fn fields(&self) -> &CertificateFields {
        &self.fields
    }

    /// Issuer common name, or empty.
    pub fn issuer(&self) -> &str {
        self.fields.issuer.common_name().unwrap_or_default()
    }

    /// Issuer organization, or empty.
    pub fn organization(&self) -> &str {
        self.fields.issuer.organization().unwrap_or_default()
    }

    pub fn serial_number(&self) -> &str {
        &self.fields.serial_number
    }

    /// Signature algorithm short name (e.g. "RSA-SHA256"), or empty.
    pub fn signature_algorithm(&self) -> &str {
        &self.fields.signature_type_sn
    }

    /// Primary domain: the subject common name, or empty.
    ///
    /// When the subject carries several CN values the first one wins.
    pub fn domain(&self) -> &str {
        self.fields.subject.common_name().unwrap_or_default()
    }

    /// Entries of the Subject Alternative Name extension, `DNS:` prefix removed.
    ///
    /// Order and duplicates are preserved. Non-DNS entries keep their prefix
    /// (e.g. `IP Address:127.0.0.1`).
    pub fn additional_domains(&self) -> Vec<String> {
        match self.fields.extensions.get(EXT_KEY_SUBJECT_ALT_NAME) {
            Some(san) if !san.is_empty() => san
                .split(", ")
                .map(|entry| entry.strip_prefix("DNS:").unwrap_or(entry).to_string())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Every name the certificate covers: additional domains, then the
    /// primary domain, deduplicated, empty names dropped.
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = Vec::new();
        let primary = self.domain().to_string();
        for name in self.additional_domains().into_iter().chain(Some(primary)) {
            if !name.is_empty() && !domains.contains(&name) {
                domains.push(name);
            }
        }
        domains
    }

    /// SHA-1 fingerprint.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn fingerprint_sha256(&self) -> &str {
        &self.fingerprint_sha256
    }

    /// Address the certificate was fetched from; empty for file/string input.
    pub fn remote_address(&self) -> &str {
        &self.remote_address
    }

    pub fn public_key_info(&self) -> &PublicKeyInfo {
        &self.public_key_info
    }

    pub fn public_key_algorithm(&self) -> KeyAlgorithm {
        self.public_key_info.algorithm
    }

    /// Public key size in bits, zero when unknown.
    pub fn public_key_size(&self) -> u32 {
        self.public_key_info.bits
    }

    pub fn valid_from_date(&self) -> OffsetDateTime {
        timestamp_to_datetime(self.fields.valid_from_time_t)
    }

    pub fn expiration_date(&self) -> OffsetDateTime {
        timestamp_to_datetime(self.fields.valid_to_time_t)
    }

    // ── Validity ─────────────────────────────────────────────────────────

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }

    /// Whether `now` lies after the end of the validity window.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now > self.expiration_date()
    }

    /// Whether the certificate is inside its validity window now and, if a
    /// host is given, covers that host.
    pub fn is_valid(&self, host: Option<&str>) -> bool {
        self.is_valid_at(host, OffsetDateTime::now_utc())
    }

    /// Both window bounds are inclusive.
    pub fn is_valid_at(&self, host: Option<&str>, now: OffsetDateTime) -> bool {
        if now < self.valid_from_date() || now > self.expiration_date() {
            return false;
        }
        match host {
            Some(host) if !host.is_empty() => self.applies_to_host(host),
            _ => true,
        }
    }

    /// Valid now and still valid strictly after `threshold`.
    pub fn is_valid_until(&self, threshold: OffsetDateTime, host: Option<&str>) -> bool {
        self.is_valid_until_at(threshold, host, OffsetDateTime::now_utc())
    }

    pub fn is_valid_until_at(
        &self,
        threshold: OffsetDateTime,
        host: Option<&str>,
        now: OffsetDateTime,
    ) -> bool {
        self.expiration_date() > threshold && self.is_valid_at(host, now)
    }

    /// Whole days until expiration; negative once expired.
    pub fn days_until_expiration(&self) -> i64 {
        self.days_until_expiration_at(OffsetDateTime::now_utc())
    }

    pub fn days_until_expiration_at(&self, now: OffsetDateTime) -> i64 {
        (self.expiration_date() - now).whole_days()
    }

    /// Whole days between the start and the end of the validity window.
    pub fn lifespan_in_days(&self) -> i64 {
        (self.expiration_date() - self.valid_from_date()).whole_days()
    }

    /// Issuer CN equals subject CN (case-sensitive).
    pub fn is_self_signed(&self) -> bool {
        self.issuer() == self.domain()
    }

    /// Signed with SHA-1 over RSA.
    pub fn uses_weak_hash(&self) -> bool {
        self.fields.signature_type_sn == "RSA-SHA1"
            || self.fields.signature_type_ln == "sha1WithRSAEncryption"
    }

    /// Carries the Certificate Transparency poison extension.
    ///
    /// Precertificates are CT log artifacts and are never served for TLS.
    pub fn is_pre_certificate(&self) -> bool {
        self.fields.extensions.contains_key(EXT_KEY_CT_POISON)
    }

    // ── Matching ─────────────────────────────────────────────────────────

    /// Whether the certificate covers the host of `target` (hostname, IP or URL).
    pub fn applies_to_host(&self, target: &str) -> bool {
        matcher::applies_to_host(&self.domains(), target)
    }

    /// Loose, reporting-only membership check. Not for trust decisions.
    pub fn contains_domain(&self, domain: &str) -> bool {
        matcher::contains_domain(&self.domains(), domain)
    }

    // ── Serialization ────────────────────────────────────────────────────

    /// The constructor inputs as a property bag.
    pub fn to_properties(&self) -> CertificateProperties {
        CertificateProperties {
            fields: self.fields.clone(),
            fingerprint: self.fingerprint.clone(),
            fingerprint_sha256: self.fingerprint_sha256.clone(),
            remote_address: self.remote_address.clone(),
            public_key_info: self.public_key_info.clone(),
        }
    }

    /// Content hash: hex SHA-256 of the JSON-serialized fields.
    ///
    /// Provenance (remote address) does not contribute.
    pub fn hash(&self) -> String {
        // Plain data with string keys always serializes.
        let json = serde_json::to_vec(&self.fields).unwrap_or_default();
        hex::encode(sha2::Sha256::digest(&json))
    }
}

impl From<CertificateProperties> for Certificate {
    fn from(properties: CertificateProperties) -> Self {
        Self::from_properties(properties)
    }
}

fn timestamp_to_datetime(ts: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(ts).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
