//! Webhook signature verification
//!
//! Paystack signs each webhook delivery with HMAC-SHA512 over the raw
//! request body, keyed by the account secret, and sends the hex digest in
//! the `x-paystack-signature` header. Verification must run against the
//! exact bytes received, before any JSON parsing.

use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the webhook signature
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// Verify a webhook body against its signature header.
///
/// The hex header is decoded and handed to the MAC's own verification,
/// which compares in constant time. Any malformed header fails closed.
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };

    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Compute the hex signature for a body. Used by tests and by outbound
/// request signing in development tooling.
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "sk_test_d41d8cd98f00b204e9800998ecf8427e";

    #[test]
    fn accepts_a_correctly_signed_body() {
        let body = br#"{"event":"charge.success","data":{"reference":"FUND_1","amount":50000}}"#;
        let signature = sign(SECRET, body);
        assert!(verify_signature(SECRET, body, &signature));
    }

    #[test]
    fn rejects_a_tampered_body() {
        let body = br#"{"event":"charge.success","data":{"reference":"FUND_1","amount":50000}}"#;
        let tampered = br#"{"event":"charge.success","data":{"reference":"FUND_1","amount":99999}}"#;
        let signature = sign(SECRET, body);
        assert!(!verify_signature(SECRET, tampered, &signature));
    }

    #[test]
    fn rejects_a_signature_from_another_secret() {
        let body = br#"{"event":"transfer.failed","data":{"reference":"w-1"}}"#;
        let signature = sign("sk_test_other", body);
        assert!(!verify_signature(SECRET, body, &signature));
    }

    #[test]
    fn rejects_non_hex_and_truncated_signatures() {
        let body = b"{}";
        assert!(!verify_signature(SECRET, body, "not-hex!"));
        assert!(!verify_signature(SECRET, body, ""));
        let valid = sign(SECRET, body);
        assert!(!verify_signature(SECRET, body, &valid[..valid.len() - 2]));
    }
}
