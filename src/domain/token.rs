//! Opaque token generation and digesting.
//!
//! Session tokens and emailed one-time tokens share the same shape:
//! 32 random bytes, URL-safe base64 on the wire, SHA-256 digest in the
//! database so raw values never touch storage.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::config::{RESET_TOKEN_TTL_MINUTES, VERIFY_TOKEN_TTL_HOURS};

/// Purpose of a one-time emailed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    PasswordReset,
    EmailVerification,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::PasswordReset => "password_reset",
            TokenPurpose::EmailVerification => "email_verification",
        }
    }

    /// Validity window for freshly issued tokens of this purpose.
    pub fn ttl(&self) -> chrono::Duration {
        match self {
            TokenPurpose::PasswordReset => chrono::Duration::minutes(RESET_TOKEN_TTL_MINUTES),
            TokenPurpose::EmailVerification => chrono::Duration::hours(VERIFY_TOKEN_TTL_HOURS),
        }
    }
}

/// Generate a fresh opaque token. The return value is sent to the
/// client (cookie or email link) and then forgotten server-side.
pub fn generate() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Digest a token for storage and lookup.
pub fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn digest_is_deterministic_and_differs_from_input() {
        let token = generate();
        assert_eq!(digest(&token), digest(&token));
        assert_ne!(digest(&token), token);
    }

    #[test]
    fn purposes_map_to_storage_strings() {
        assert_eq!(TokenPurpose::PasswordReset.as_str(), "password_reset");
        assert_eq!(TokenPurpose::EmailVerification.as_str(), "email_verification");
    }
}
