#![no_main]

use libfuzzer_sys::fuzz_target;
use sslcert_lib::{Certificate, CertificateProperties};
use time::OffsetDateTime;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, regardless of input.
    if let Ok(cert) = Certificate::from_bytes(data) {
        let now = OffsetDateTime::UNIX_EPOCH;
        let _ = cert.domains();
        let _ = cert.issuer();
        let _ = cert.organization();
        let _ = cert.expiration_date();
        let _ = cert.days_until_expiration_at(now);
        let _ = cert.lifespan_in_days();
        let _ = cert.is_valid_at(Some("example.com"), now);
        let _ = cert.applies_to_host("https://www.example.com:8443/");
        let _ = cert.contains_domain("example.com");
        let _ = cert.is_pre_certificate();
        let _ = cert.uses_weak_hash();
        let _ = cert.hash();

        let _ = sslcert_lib::display_text(&cert, now);
        let _ = sslcert_lib::to_json(&cert, now);

        // The property bag must reproduce the certificate.
        if let Ok(json) = cert.to_properties().to_json() {
            if let Ok(props) = CertificateProperties::from_json(&json) {
                assert_eq!(Certificate::from_properties(props), cert);
            }
        }
    }
});
