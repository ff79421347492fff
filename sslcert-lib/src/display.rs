//! Human-readable and JSON summaries of a certificate.

use crate::certificate::Certificate;
use crate::fields::PublicKeyInfo;
use crate::SslCertError;
use serde::Serialize;
use time::OffsetDateTime;

/// Format in OpenSSL's default date style: `Feb  3 23:57:06 2026 GMT`.
pub fn openssl_date(dt: OffsetDateTime) -> String {
    let month = match u8::from(dt.month()) {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    };
    format!(
        "{} {:2} {:02}:{:02}:{:02} {} GMT",
        month,
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.year()
    )
}

/// Format a certificate as human-readable text, with day counts taken at `now`.
pub fn display_text(cert: &Certificate, now: OffsetDateTime) -> String {
    let mut out = String::new();

    out.push_str("Certificate:\n");
    out.push_str(&format!("  Domain: {}\n", cert.domain()));
    let additional = cert.additional_domains();
    if !additional.is_empty() {
        out.push_str("  Additional Domains:\n");
        for name in &additional {
            out.push_str(&format!("    {}\n", name));
        }
    }
    out.push_str(&format!("  Issuer: {}\n", cert.issuer()));
    if !cert.organization().is_empty() {
        out.push_str(&format!("  Organization: {}\n", cert.organization()));
    }
    out.push_str(&format!("  Serial: {}\n", cert.serial_number()));
    out.push_str(&format!(
        "  Signature Algorithm: {}\n",
        cert.signature_algorithm()
    ));

    out.push_str("  Validity:\n");
    out.push_str(&format!(
        "    Not Before: {}\n",
        openssl_date(cert.valid_from_date())
    ));
    out.push_str(&format!(
        "    Not After:  {}\n",
        openssl_date(cert.expiration_date())
    ));
    let days = cert.days_until_expiration_at(now);
    if cert.is_expired_at(now) {
        out.push_str(&format!("    Expired {} days ago\n", -days));
    } else {
        out.push_str(&format!("    Expires in {} days\n", days));
    }
    out.push_str(&format!("    Lifespan: {} days\n", cert.lifespan_in_days()));

    out.push_str(&format!("  Public Key: {}\n", format_key(cert.public_key_info())));

    let flags: Vec<&str> = [
        (cert.is_self_signed(), "self-signed"),
        (cert.uses_weak_hash(), "weak hash (SHA-1)"),
        (cert.is_pre_certificate(), "precertificate"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();
    if !flags.is_empty() {
        out.push_str(&format!("  Notes: {}\n", flags.join(", ")));
    }

    out.push_str(&format!("  Fingerprint (SHA-1): {}\n", cert.fingerprint()));
    out.push_str(&format!(
        "  Fingerprint (SHA-256): {}\n",
        cert.fingerprint_sha256()
    ));
    if !cert.remote_address().is_empty() {
        out.push_str(&format!("  Remote Address: {}\n", cert.remote_address()));
    }

    out
}

fn format_key(info: &PublicKeyInfo) -> String {
    let mut s = info.algorithm.to_string();
    if info.bits > 0 {
        s.push_str(&format!(" ({} bit)", info.bits));
    }
    if let Some(curve) = &info.curve {
        s.push_str(&format!(" [{}]", curve));
    }
    s
}

#[derive(Serialize)]
struct Summary<'a> {
    domain: &'a str,
    additional_domains: Vec<String>,
    domains: Vec<String>,
    issuer: &'a str,
    organization: &'a str,
    serial_number: &'a str,
    signature_algorithm: &'a str,
    valid_from: &'a str,
    valid_to: &'a str,
    days_until_expiration: i64,
    lifespan_in_days: i64,
    expired: bool,
    self_signed: bool,
    weak_hash: bool,
    pre_certificate: bool,
    public_key: &'a PublicKeyInfo,
    fingerprint: &'a str,
    fingerprint_sha256: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    remote_address: &'a str,
    hash: String,
}

/// Serialize a certificate summary, including derived facts at `now`, to
/// pretty-printed JSON.
pub fn to_json(cert: &Certificate, now: OffsetDateTime) -> Result<String, SslCertError> {
    let fields = cert.fields();
    let summary = Summary {
        domain: cert.domain(),
        additional_domains: cert.additional_domains(),
        domains: cert.domains(),
        issuer: cert.issuer(),
        organization: cert.organization(),
        serial_number: cert.serial_number(),
        signature_algorithm: cert.signature_algorithm(),
        valid_from: &fields.valid_from,
        valid_to: &fields.valid_to,
        days_until_expiration: cert.days_until_expiration_at(now),
        lifespan_in_days: cert.lifespan_in_days(),
        expired: cert.is_expired_at(now),
        self_signed: cert.is_self_signed(),
        weak_hash: cert.uses_weak_hash(),
        pre_certificate: cert.is_pre_certificate(),
        public_key: cert.public_key_info(),
        fingerprint: cert.fingerprint(),
        fingerprint_sha256: cert.fingerprint_sha256(),
        remote_address: cert.remote_address(),
        hash: cert.hash(),
    };
    serde_json::to_string_pretty(&summary).map_err(SslCertError::Json)
}
