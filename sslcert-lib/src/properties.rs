//! Persistable property bag of a certificate.

use crate::fields::{CertificateFields, PublicKeyInfo};
use crate::SslCertError;
use serde::{Deserialize, Serialize};

/// The constructor inputs of a [`Certificate`](crate::Certificate).
///
/// In serialized form `public_key_info` is a base64 string of its JSON
/// encoding. Missing keys default, so older or partial bags still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateProperties {
    pub fields: CertificateFields,
    pub fingerprint: String,
    pub fingerprint_sha256: String,
    pub remote_address: String,
    #[serde(with = "base64_json")]
    pub public_key_info: PublicKeyInfo,
}

impl CertificateProperties {
    pub fn to_json(&self) -> Result<String, SslCertError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SslCertError> {
        Ok(serde_json::from_str(json)?)
    }
}

mod base64_json {
    use crate::fields::PublicKeyInfo;
    use base64::Engine;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        info: &PublicKeyInfo,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let json = serde_json::to_vec(info).map_err(S::Error::custom)?;
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(json))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PublicKeyInfo, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        if encoded.is_empty() {
            return Ok(PublicKeyInfo::default());
        }
        let json = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| D::Error::custom(format!("public_key_info: {}", e)))?;
        serde_json::from_slice(&json).map_err(D::Error::custom)
    }
}
