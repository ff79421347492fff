#![no_main]

use libfuzzer_sys::fuzz_target;
use sslcert_lib::{der_to_pem, pem_to_der, Certificate};

fuzz_target!(|data: &[u8]| {
    // If data decodes as DER, roundtrip through PEM and back
    if sslcert_lib::is_pem(data) {
        return;
    }
    if let Ok(cert1) = Certificate::from_bytes(data) {
        let pem = der_to_pem(data);
        if let Ok(der_back) = pem_to_der(pem.as_bytes()) {
            assert_eq!(der_back, data, "DER changed after PEM roundtrip");
            if let Ok(cert2) = Certificate::from_bytes(&der_back) {
                assert_eq!(cert1.hash(), cert2.hash(), "fields changed after roundtrip");
                assert_eq!(cert1.fingerprint(), cert2.fingerprint());
            }
        }
    }
});
