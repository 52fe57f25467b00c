//! Password value object and strength policy.
//!
//! The policy is a pure check shared by the route gate and the services;
//! hashing and verification wrap Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

/// Outcome of a failed strength check. The reason is for logs and
/// service-level validation errors, never the gate's HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyViolation {
    pub reason: String,
}

/// Check a candidate password against the strength policy.
///
/// Pure and side-effect free: length bounds plus minimum character
/// variety (lowercase, uppercase, digit).
pub fn check_strength(candidate: &str) -> Result<(), PolicyViolation> {
    if candidate.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PolicyViolation {
            reason: format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        });
    }
    if candidate.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(PolicyViolation {
            reason: format!("Password must be at most {} characters", MAX_PASSWORD_LENGTH),
        });
    }
    if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PolicyViolation {
            reason: "Password must contain a lowercase letter".to_string(),
        });
    }
    if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PolicyViolation {
            reason: "Password must contain an uppercase letter".to_string(),
        });
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(PolicyViolation {
            reason: "Password must contain a digit".to_string(),
        });
    }
    Ok(())
}

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns a validation error when the plain text fails the
    /// strength policy.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        check_strength(plain_text).map_err(|v| AppError::validation(v.reason))?;

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_rejects_short_passwords() {
        assert!(check_strength("short").is_err());
        assert!(check_strength("Ab1").is_err());
    }

    #[test]
    fn policy_rejects_missing_character_classes() {
        assert!(check_strength("alllowercase1").is_err());
        assert!(check_strength("ALLUPPERCASE1").is_err());
        assert!(check_strength("NoDigitsHere").is_err());
    }

    #[test]
    fn policy_accepts_strong_passwords() {
        assert!(check_strength("Str0ng&Passw0rd!").is_ok());
        assert!(check_strength("Abcdefg1").is_ok());
    }

    #[test]
    fn policy_rejects_oversized_passwords() {
        let oversized = format!("Aa1{}", "x".repeat(MAX_PASSWORD_LENGTH));
        assert!(check_strength(&oversized).is_err());
    }

    #[test]
    fn hash_and_verify() {
        let password = Password::new("SecurePassword123").unwrap();

        assert!(password.verify("SecurePassword123"));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn restored_hash_verifies() {
        let password = Password::new("TestPassword123").unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify("TestPassword123"));
    }

    #[test]
    fn same_password_different_salts() {
        let first = Password::new("SamePassword123").unwrap();
        let second = Password::new("SamePassword123").unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify("SamePassword123"));
        assert!(second.verify("SamePassword123"));
    }

    #[test]
    fn weak_password_never_hashed() {
        assert!(Password::new("short").is_err());
    }
}
