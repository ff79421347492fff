//! PEM <-> DER format conversion.

use crate::util;
use crate::SslCertError;
use std::borrow::Cow;

pub(crate) const PEM_HEADER: &str = "-----BEGIN CERTIFICATE-----";
pub(crate) const PEM_FOOTER: &str = "-----END CERTIFICATE-----";

/// Whether the input carries a PEM certificate header anywhere in it.
pub fn is_pem(input: &[u8]) -> bool {
    input
        .windows(PEM_HEADER.len())
        .any(|w| w == PEM_HEADER.as_bytes())
}

/// Convert DER-encoded certificate bytes to a PEM string.
///
/// The body is base64 wrapped at 64 columns and framed with the
/// `BEGIN/END CERTIFICATE` markers.
pub fn der_to_pem(der: &[u8]) -> String {
    format!("{}\n{}\n{}\n", PEM_HEADER, util::base64_wrap(der), PEM_FOOTER)
}

/// Convert a PEM-encoded certificate to DER bytes.
///
/// Blocks with other labels (private keys, parameters) are skipped; the
/// first certificate block wins.
pub fn pem_to_der(pem: &[u8]) -> Result<Vec<u8>, SslCertError> {
    let mut skipped = Vec::new();
    for block in x509_parser::pem::Pem::iter_from_buffer(pem) {
        let block = block.map_err(|e| SslCertError::PemError(format!("{}", e)))?;
        match block.label.as_str() {
            "CERTIFICATE" | "TRUSTED CERTIFICATE" | "X509 CERTIFICATE" => {
                return Ok(block.contents)
            }
            other => {
                tracing::debug!(label = other, "skipping non-certificate PEM block");
                skipped.push(block.label);
            }
        }
    }

    if skipped.is_empty() {
        Err(SslCertError::PemError("no PEM block found".into()))
    } else {
        Err(SslCertError::PemError(format!(
            "expected CERTIFICATE, got {}",
            skipped.join(", ")
        )))
    }
}

/// Return the input as PEM text, converting from DER when no PEM header is present.
pub(crate) fn ensure_pem(input: &[u8]) -> Cow<'_, [u8]> {
    if is_pem(input) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(der_to_pem(input).into_bytes())
    }
}
