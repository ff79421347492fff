//! sslcert-lib: Library for inspecting X.509 server certificates.
//!
//! Decodes certificates from PEM or DER (or fetches them from a live TLS
//! endpoint) into an immutable [`Certificate`] and answers the questions
//! monitoring needs: who issued it, which names it covers, whether it is
//! valid now or still valid at a given moment, and whether it matches a host.
//!
//! ```
//! # fn main() -> Result<(), sslcert_lib::SslCertError> {
//! let pem = std::fs::read("../tests/certs/example.pem")?;
//! let cert = sslcert_lib::Certificate::from_bytes(&pem)?;
//! assert_eq!(cert.domain(), "example.com");
//! assert!(cert.applies_to_host("www.example.com"));
//! # Ok(())
//! # }
//! ```

mod certificate;
mod convert;
mod decoder;
mod display;
mod downloader;
mod fields;
mod fingerprint;
mod matcher;
mod oid;
mod properties;
mod util;

pub use certificate::Certificate;
pub use convert::{der_to_pem, is_pem, pem_to_der};
pub use decoder::{decode_pem, DecodedCertificate};
pub use display::{display_text, openssl_date, to_json};
pub use downloader::{Downloader, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use fields::{
    CertificateFields, DistinguishedName, KeyAlgorithm, PublicKeyInfo, EXT_KEY_CT_POISON,
    EXT_KEY_SUBJECT_ALT_NAME,
};
pub use fingerprint::{compute_fingerprint, DigestAlgorithm};
pub use matcher::{applies_to_host, contains_domain, host_of, wildcard_covers_host};
pub use properties::CertificateProperties;

/// Errors returned by sslcert-lib.
#[derive(Debug, thiserror::Error)]
pub enum SslCertError {
    #[error("Failed to parse certificate: {0}")]
    ParseError(String),

    #[error("Invalid PEM format: {0}")]
    PemError(String),

    #[error("Invalid DER format: {0}")]
    DerError(String),

    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    #[error("Invalid host: '{0}'")]
    InvalidHost(String),

    #[error("Could not connect to {host}: {message}")]
    Connection { host: String, message: String },

    #[error("Connection to {host} timed out")]
    Timeout { host: String },

    #[error("{host} did not present any certificates")]
    NoCertificates { host: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
