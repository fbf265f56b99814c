//! Signature verification for incoming LINE webhook requests
//!
//! LINE signs every webhook body with HMAC-SHA256 keyed by the channel secret
//! and sends the base64 encoded digest in the `X-Line-Signature` header.
//!
//! # Important Notes
//!
//! - The signature MUST be computed on the raw request body bytes, not parsed JSON
//! - The comparison must be constant-time

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies the `X-Line-Signature` header against the request payload
///
/// # Arguments
///
/// * `signature_header` - The value of the X-Line-Signature header (base64)
/// * `payload` - The raw request body bytes
/// * `channel_secret` - The LINE channel secret
///
/// # Returns
///
/// * `true` if the signature is valid
/// * `false` if the signature is invalid or not base64
pub fn verify_signature(signature_header: &str, payload: &[u8], channel_secret: &str) -> bool {
    let expected_signature = match BASE64.decode(signature_header.trim()) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "Failed to decode signature base64: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            logfire::error!(
                "Failed to create HMAC instance: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    mac.update(payload);
    let computed_signature = mac.finalize().into_bytes();

    let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();

    if !is_valid {
        logfire::warn!("Webhook signature verification failed: signatures do not match");
    }

    is_valid
}

#[cfg(test)]
pub(crate) fn sign(payload: &[u8], channel_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).unwrap();
    mac.update(payload);
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_signature_valid() {
        let payload = br#"{"destination":"U1","events":[]}"#;
        let secret = "test_secret";

        let header = sign(payload, secret);

        assert!(verify_signature(&header, payload, secret));
    }

    #[test]
    fn test_verify_signature_known_vector() {
        // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
        let header = "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=";
        let payload = b"The quick brown fox jumps over the lazy dog";

        assert!(verify_signature(header, payload, "key"));
    }

    #[test]
    fn test_verify_signature_wrong_secret() {
        let payload = b"{\"test\":\"data\"}";

        let header = sign(payload, "wrong_secret");

        assert!(!verify_signature(&header, payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_invalid_base64() {
        let payload = b"{\"test\":\"data\"}";

        assert!(!verify_signature("not base64!!", payload, "test_secret"));
        assert!(!verify_signature("", payload, "test_secret"));
    }

    #[test]
    fn test_verify_signature_tampered_payload() {
        let secret = "test_secret";
        let header = sign(b"{\"test\":\"data\"}", secret);

        assert!(!verify_signature(&header, b"{\"test\":\"hacked\"}", secret));
    }
}
