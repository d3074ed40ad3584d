//! Webhook signature verification.
//!
//! LINE signs every delivery with `base64(HMAC-SHA256(channel_secret, body))`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::LineError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

fn mac(secret: &str, body: &[u8]) -> Result<HmacSha256, LineError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| LineError::InvalidSignature)?;
    mac.update(body);
    Ok(mac)
}

/// Compute the signature LINE would send for `body`.
#[cfg(test)]
pub fn sign(secret: &str, body: &[u8]) -> Result<String, LineError> {
    let mac = mac(secret, body)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify `signature` against `body` in constant time.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> Result<(), LineError> {
    let expected = STANDARD
        .decode(signature.trim())
        .map_err(|_| LineError::InvalidSignature)?;

    mac(secret, body)?
        .verify_slice(&expected)
        .map_err(|_| LineError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_body_verifies() {
        let body = br#"{"events":[]}"#;
        let signature = sign("secret", body).unwrap();

        assert!(verify_signature("secret", body, &signature).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let body = br#"{"events":[]}"#;
        let signature = sign("other", body).unwrap();

        assert!(matches!(
            verify_signature("secret", body, &signature),
            Err(LineError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let signature = sign("secret", br#"{"events":[]}"#).unwrap();

        assert!(verify_signature("secret", br#"{"events":[{}]}"#, &signature).is_err());
    }

    #[test]
    fn test_non_base64_signature_is_rejected() {
        assert!(verify_signature("secret", b"{}", "not base64!!").is_err());
    }
}
