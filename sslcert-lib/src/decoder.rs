//! X.509 decoding from PEM into the field model.

use crate::convert;
use crate::fields::{
    CertificateFields, DistinguishedName, KeyAlgorithm, PublicKeyInfo, EXT_KEY_CT_POISON,
};
use crate::fingerprint::{compute_fingerprint, DigestAlgorithm};
use crate::oid;
use crate::util;
use crate::SslCertError;
use std::collections::BTreeMap;
use x509_parser::der_parser::asn1_rs::ToDer;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

/// Result of decoding one PEM certificate.
#[derive(Debug, Clone)]
pub struct DecodedCertificate {
    pub fields: CertificateFields,
    pub public_key_info: PublicKeyInfo,
    /// The certificate's DER encoding (without any trailing data).
    pub der: Vec<u8>,
}

impl DecodedCertificate {
    /// Fingerprint of the DER encoding.
    pub fn fingerprint(&self, algorithm: DigestAlgorithm) -> String {
        compute_fingerprint(&self.der, algorithm)
    }
}

/// Decode a PEM-framed certificate.
pub fn decode_pem(pem: &[u8]) -> Result<DecodedCertificate, SslCertError> {
    let mut der = convert::pem_to_der(pem)?;
    let (cert_len, fields, public_key_info) = {
        let (remaining, x509) = X509Certificate::from_der(&der)
            .map_err(|e| SslCertError::DerError(format!("{}", e)))?;
        (
            der.len() - remaining.len(),
            build_fields(&x509)?,
            build_public_key_info(&x509.tbs_certificate.subject_pki),
        )
    };
    tracing::debug!(
        subject = %fields.name,
        signature = %fields.signature_type_sn,
        key = %public_key_info.algorithm,
        bits = public_key_info.bits,
        "decoded certificate"
    );

    // Fingerprints cover the certificate only, not trailing data.
    der.truncate(cert_len);
    Ok(DecodedCertificate {
        fields,
        public_key_info,
        der,
    })
}

fn build_fields(x509: &X509Certificate) -> Result<CertificateFields, SslCertError> {
    let tbs = &x509.tbs_certificate;

    let raw_version = tbs.version.0;
    if raw_version > 2 {
        return Err(SslCertError::ParseError(format!(
            "unsupported X.509 version {} (expected v1, v2, or v3)",
            raw_version + 1
        )));
    }

    let subject = build_dn(&tbs.subject);
    let issuer = build_dn(&tbs.issuer);
    let (signature_type_sn, signature_type_ln) = signature_names(&x509.signature_algorithm);
    let valid_from_time_t = tbs.validity.not_before.timestamp();
    let valid_to_time_t = tbs.validity.not_after.timestamp();

    Ok(CertificateFields {
        name: subject.to_oneline(),
        subject,
        issuer,
        version: raw_version + 1,
        serial_number: format_serial(tbs.raw_serial()),
        valid_from: format_iso8601(valid_from_time_t),
        valid_to: format_iso8601(valid_to_time_t),
        valid_from_time_t,
        valid_to_time_t,
        signature_type_sn,
        signature_type_ln,
        extensions: build_extensions(tbs.extensions()),
        other: BTreeMap::new(),
    })
}

/// Format a serial number as a colon-separated uppercase hex string,
/// stripping leading zero bytes but keeping at least one byte.
fn format_serial(raw: &[u8]) -> String {
    let stripped = match raw.iter().position(|&b| b != 0) {
        Some(pos) => raw.get(pos..).unwrap_or(raw),
        None => raw.get(raw.len().saturating_sub(1)..).unwrap_or(raw),
    };
    util::hex_colon_upper(stripped)
}

/// OpenSSL short and long names of a signature algorithm.
fn signature_names(algo: &AlgorithmIdentifier) -> (String, String) {
    let (sn, ln) = match algo.algorithm.to_id_string().as_str() {
        oid::MD5_WITH_RSA => ("RSA-MD5", "md5WithRSAEncryption"),
        oid::SHA1_WITH_RSA => ("RSA-SHA1", "sha1WithRSAEncryption"),
        oid::SHA256_WITH_RSA => ("RSA-SHA256", "sha256WithRSAEncryption"),
        oid::SHA384_WITH_RSA => ("RSA-SHA384", "sha384WithRSAEncryption"),
        oid::SHA512_WITH_RSA => ("RSA-SHA512", "sha512WithRSAEncryption"),
        oid::RSASSA_PSS => ("RSASSA-PSS", "rsassaPss"),
        oid::DSA_WITH_SHA1 => ("DSA-SHA1", "dsaWithSHA1"),
        oid::DSA_WITH_SHA256 => ("dsa_with_SHA256", "dsa_with_SHA256"),
        oid::ECDSA_WITH_SHA1 => ("ecdsa-with-SHA1", "ecdsa-with-SHA1"),
        oid::ECDSA_WITH_SHA256 => ("ecdsa-with-SHA256", "ecdsa-with-SHA256"),
        oid::ECDSA_WITH_SHA384 => ("ecdsa-with-SHA384", "ecdsa-with-SHA384"),
        oid::ECDSA_WITH_SHA512 => ("ecdsa-with-SHA512", "ecdsa-with-SHA512"),
        oid::ED25519 => ("ED25519", "ED25519"),
        oid::ED448 => ("ED448", "ED448"),
        other => return (other.to_string(), other.to_string()),
    };
    (sn.to_string(), ln.to_string())
}

pub(crate) fn build_dn(name: &X509Name) -> DistinguishedName {
    let mut components = Vec::new();
    for rdn in name.iter() {
        for attr in rdn.iter() {
            let key = util::oid_short_name(&attr.attr_type().to_id_string());
            let value = attr.as_str().unwrap_or("<binary>").to_string();
            components.push((key, value));
        }
    }
    DistinguishedName::new(components)
}

fn format_iso8601(ts: i64) -> String {
    match ::time::OffsetDateTime::from_unix_timestamp(ts) {
        Ok(dt) => format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        Err(_) => ts.to_string(),
    }
}

fn build_public_key_info(spki: &SubjectPublicKeyInfo) -> PublicKeyInfo {
    match spki.algorithm.algorithm.to_id_string().as_str() {
        oid::RSA_ENCRYPTION => PublicKeyInfo {
            algorithm: KeyAlgorithm::Rsa,
            bits: match spki.parsed() {
                Ok(PublicKey::RSA(rsa)) => util::integer_bits(rsa.modulus),
                _ => 0,
            },
            curve: None,
        },
        oid::EC_PUBLIC_KEY => {
            let curve = extract_ec_curve(&spki.algorithm);
            let bits = match curve.as_str() {
                "P-256" => 256,
                "P-384" => 384,
                "P-521" => 521,
                _ => 0,
            };
            PublicKeyInfo {
                algorithm: KeyAlgorithm::Ec,
                bits,
                curve: Some(curve),
            }
        }
        oid::DSA => PublicKeyInfo {
            algorithm: KeyAlgorithm::Dsa,
            bits: parameter_prime_bits(&spki.algorithm).unwrap_or(0),
            curve: None,
        },
        oid::DH_KEY_AGREEMENT | oid::DH_PUBLIC_NUMBER => PublicKeyInfo {
            algorithm: KeyAlgorithm::Dh,
            bits: parameter_prime_bits(&spki.algorithm).unwrap_or(0),
            curve: None,
        },
        oid::ED25519 => PublicKeyInfo {
            algorithm: KeyAlgorithm::Unknown,
            bits: 256,
            curve: None,
        },
        oid::ED448 => PublicKeyInfo {
            algorithm: KeyAlgorithm::Unknown,
            bits: 448,
            curve: None,
        },
        _ => PublicKeyInfo::default(),
    }
}

/// Bit length of the first INTEGER in a DER SEQUENCE (the prime `p` of
/// DSA/DH domain parameters).
fn first_integer_bits(der: &[u8]) -> Option<u32> {
    let (_, parsed) = x509_parser::der_parser::parse_der(der).ok()?;
    let seq = parsed.as_sequence().ok()?;
    let first = seq.first()?.as_slice().ok()?;
    Some(util::integer_bits(first))
}

fn parameter_prime_bits(algo: &AlgorithmIdentifier) -> Option<u32> {
    let params = algo.parameters.as_ref()?.to_der_vec().ok()?;
    first_integer_bits(&params)
}

fn extract_ec_curve(algo: &AlgorithmIdentifier) -> String {
    if let Some(params) = &algo.parameters {
        if let Ok(oid) = params.as_oid() {
            return match oid.to_id_string().as_str() {
                oid::CURVE_P256 => "P-256".into(),
                oid::CURVE_P384 => "P-384".into(),
                oid::CURVE_P521 => "P-521".into(),
                other => other.to_string(),
            };
        }
    }
    "unknown".into()
}

fn build_extensions(extensions: &[X509Extension]) -> BTreeMap<String, String> {
    extensions
        .iter()
        .map(|ext| {
            let oid = ext.oid.to_id_string();
            (extension_short_name(&oid), render_extension(&oid, ext))
        })
        .collect()
}

/// Render an extension value the way `openssl x509 -text` prints it.
fn render_extension(oid_str: &str, ext: &X509Extension) -> String {
    if oid_str == oid::EXT_CT_POISON {
        return "NULL".into();
    }

    match ext.parsed_extension() {
        ParsedExtension::BasicConstraints(bc) => {
            let ca = if bc.ca { "CA:TRUE" } else { "CA:FALSE" };
            match bc.path_len_constraint {
                Some(n) => format!("{}, pathlen:{}", ca, n),
                None => ca.to_string(),
            }
        }
        ParsedExtension::KeyUsage(ku) => {
            let flags = [
                (ku.digital_signature(), "Digital Signature"),
                (ku.non_repudiation(), "Non Repudiation"),
                (ku.key_encipherment(), "Key Encipherment"),
                (ku.data_encipherment(), "Data Encipherment"),
                (ku.key_agreement(), "Key Agreement"),
                (ku.key_cert_sign(), "Certificate Sign"),
                (ku.crl_sign(), "CRL Sign"),
                (ku.encipher_only(), "Encipher Only"),
                (ku.decipher_only(), "Decipher Only"),
            ];
            flags
                .iter()
                .filter(|(set, _)| *set)
                .map(|(_, name)| *name)
                .collect::<Vec<_>>()
                .join(", ")
        }
        ParsedExtension::ExtendedKeyUsage(eku) => {
            let flags = [
                (eku.any, "Any Extended Key Usage"),
                (eku.server_auth, "TLS Web Server Authentication"),
                (eku.client_auth, "TLS Web Client Authentication"),
                (eku.code_signing, "Code Signing"),
                (eku.email_protection, "E-mail Protection"),
                (eku.time_stamping, "Time Stamping"),
                (eku.ocsp_signing, "OCSP Signing"),
            ];
            let mut usages: Vec<String> = flags
                .iter()
                .filter(|(set, _)| *set)
                .map(|(_, name)| name.to_string())
                .collect();
            usages.extend(eku.other.iter().map(|o| o.to_id_string()));
            usages.join(", ")
        }
        ParsedExtension::SubjectAlternativeName(san) => san
            .general_names
            .iter()
            .map(render_general_name)
            .collect::<Vec<_>>()
            .join(", "),
        ParsedExtension::SubjectKeyIdentifier(ski) => util::hex_colon_upper(ski.0),
        ParsedExtension::AuthorityKeyIdentifier(aki) => aki
            .key_identifier
            .as_ref()
            .map(|ki| util::hex_colon_upper(ki.0))
            .unwrap_or_default(),
        ParsedExtension::AuthorityInfoAccess(aia) => aia
            .accessdescs
            .iter()
            .map(|desc| {
                let method = match desc.access_method.to_id_string().as_str() {
                    oid::ACCESS_OCSP => "OCSP".to_string(),
                    oid::ACCESS_CA_ISSUERS => "CA Issuers".to_string(),
                    other => other.to_string(),
                };
                format!("{} - {}", method, render_general_name(&desc.access_location))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ParsedExtension::CRLDistributionPoints(cdp) => {
            let mut lines = Vec::new();
            for point in &cdp.points {
                if let Some(x509_parser::extensions::DistributionPointName::FullName(names)) =
                    &point.distribution_point
                {
                    lines.push("Full Name:".to_string());
                    lines.extend(names.iter().map(|gn| format!("  {}", render_general_name(gn))));
                }
            }
            lines.join("\n")
        }
        ParsedExtension::CertificatePolicies(policies) => policies
            .iter()
            .map(|p| format!("Policy: {}", p.policy_id.to_id_string()))
            .collect::<Vec<_>>()
            .join("\n"),
        ParsedExtension::NsCertComment(comment) => comment.to_string(),
        _ => hex::encode(ext.value),
    }
}

fn extension_short_name(oid_str: &str) -> String {
    match oid_str {
        oid::EXT_SUBJECT_KEY_ID => "subjectKeyIdentifier",
        oid::EXT_KEY_USAGE => "keyUsage",
        oid::EXT_SUBJECT_ALT_NAME => crate::fields::EXT_KEY_SUBJECT_ALT_NAME,
        oid::EXT_ISSUER_ALT_NAME => "issuerAltName",
        oid::EXT_BASIC_CONSTRAINTS => "basicConstraints",
        oid::EXT_NAME_CONSTRAINTS => "nameConstraints",
        oid::EXT_CRL_DISTRIBUTION_POINTS => "crlDistributionPoints",
        oid::EXT_CERTIFICATE_POLICIES => "certificatePolicies",
        oid::EXT_POLICY_MAPPINGS => "policyMappings",
        oid::EXT_AUTHORITY_KEY_ID => "authorityKeyIdentifier",
        oid::EXT_POLICY_CONSTRAINTS => "policyConstraints",
        oid::EXT_EXTENDED_KEY_USAGE => "extendedKeyUsage",
        oid::EXT_FRESHEST_CRL => "freshestCRL",
        oid::EXT_INHIBIT_ANY_POLICY => "inhibitAnyPolicy",
        oid::EXT_AUTHORITY_INFO_ACCESS => "authorityInfoAccess",
        oid::EXT_SUBJECT_INFO_ACCESS => "subjectInfoAccess",
        oid::EXT_TLS_FEATURE => "tlsfeature",
        oid::EXT_SCT_LIST => "ct_precert_scts",
        oid::EXT_CT_POISON => EXT_KEY_CT_POISON,
        oid::EXT_NETSCAPE_CERT_TYPE => "nsCertType",
        oid::EXT_NETSCAPE_COMMENT => "nsComment",
        other => other,
    }
    .to_string()
}

fn render_general_name(gn: &GeneralName) -> String {
    match gn {
        GeneralName::DNSName(name) => format!("DNS:{}", name),
        GeneralName::RFC822Name(email) => format!("email:{}", email),
        GeneralName::IPAddress(ip_bytes) => format!("IP Address:{}", format_ip_bytes(ip_bytes)),
        GeneralName::URI(uri) => format!("URI:{}", uri),
        GeneralName::DirectoryName(dn) => format!("DirName:{}", build_dn(dn).to_oneline()),
        GeneralName::RegisteredID(oid) => format!("Registered ID:{}", oid.to_id_string()),
        _ => "othername:<unsupported>".to_string(),
    }
}

/// Render a SAN IP address in its canonical textual form.
pub(crate) fn format_ip_bytes(bytes: &[u8]) -> String {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        std::net::Ipv4Addr::from(octets).to_string()
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        std::net::Ipv6Addr::from(octets).to_string()
    } else {
        hex::encode(bytes)
    }
}
