//! Certificate data types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extension key under which the decoder stores the Subject Alternative Name.
pub const EXT_KEY_SUBJECT_ALT_NAME: &str = "subjectAltName";
/// Extension key under which the decoder stores the CT precertificate poison.
pub const EXT_KEY_CT_POISON: &str = "ct_precert_poison";

/// Decoded X.509 fields of a certificate.
///
/// The named fields are the ones the model reads. Anything else a producer
/// put in the mapping is kept in `other`, so a property bag round-trips
/// without loss. Every field defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateFields {
    /// Subject as a one-line string.
    pub name: String,
    /// Subject distinguished name.
    pub subject: DistinguishedName,
    /// Issuer distinguished name.
    pub issuer: DistinguishedName,
    /// Certificate version (1, 2, or 3).
    pub version: u32,
    /// Serial number as a colon-separated hex string.
    pub serial_number: String,
    /// Validity start, ISO 8601.
    pub valid_from: String,
    /// Validity end, ISO 8601.
    pub valid_to: String,
    /// Validity start as a Unix timestamp.
    pub valid_from_time_t: i64,
    /// Validity end as a Unix timestamp.
    pub valid_to_time_t: i64,
    /// Signature algorithm short name (e.g. "RSA-SHA256").
    pub signature_type_sn: String,
    /// Signature algorithm long name (e.g. "sha256WithRSAEncryption").
    pub signature_type_ln: String,
    /// X.509v3 extensions keyed by OpenSSL short name, rendered as text.
    pub extensions: BTreeMap<String, String>,
    /// Residual fields not interpreted by the model.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

/// Distinguished name with ordered components.
///
/// A multi-valued attribute appears as several components with the same
/// attribute type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistinguishedName {
    /// Ordered list of (attribute_type, value) pairs.
    /// Attribute types use short names where known (e.g., "CN", "O", "C").
    pub components: Vec<(String, String)>,
}

impl DistinguishedName {
    pub fn new(components: Vec<(String, String)>) -> Self {
        Self { components }
    }

    /// First value of the given attribute type.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|(k, _)| k == attribute)
            .map(|(_, v)| v.as_str())
    }

    /// All values of the given attribute type, in order.
    pub fn get_all(&self, attribute: &str) -> Vec<&str> {
        self.components
            .iter()
            .filter(|(k, _)| k == attribute)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn common_name(&self) -> Option<&str> {
        self.get("CN")
    }

    pub fn organization(&self) -> Option<&str> {
        self.get("O")
    }

    /// Format as a comma-separated one-line string matching OpenSSL's default format.
    /// Example: "C = US, O = Org, CN = example.com"
    ///
    /// Values containing commas, equals signs, or backslashes are escaped.
    pub fn to_oneline(&self) -> String {
        let mut result = String::new();
        for (i, (k, v)) in self.components.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            result.push_str(k);
            result.push_str(" = ");
            for ch in v.chars() {
                match ch {
                    '\\' => result.push_str("\\\\"),
                    ',' => result.push_str("\\,"),
                    '=' => result.push_str("\\="),
                    _ => result.push(ch),
                }
            }
        }
        result
    }
}

impl std::fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_oneline())
    }
}

/// Public key algorithm family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "DSA")]
    Dsa,
    #[serde(rename = "DH")]
    Dh,
    #[serde(rename = "EC")]
    Ec,
    #[default]
    Unknown,
}

impl KeyAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::Dsa => "DSA",
            KeyAlgorithm::Dh => "DH",
            KeyAlgorithm::Ec => "EC",
            KeyAlgorithm::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public key information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicKeyInfo {
    /// Algorithm family; `Unknown` for anything else (Ed25519, GOST, ...).
    pub algorithm: KeyAlgorithm,
    /// Key size in bits (e.g., 2048 for RSA, 256 for P-256). Zero if unknown.
    pub bits: u32,
    /// Named curve for EC keys (e.g., "P-256", "P-384").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}
