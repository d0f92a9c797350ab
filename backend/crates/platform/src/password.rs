//! Password Hashing and Verification
//!
//! bcrypt-based credential handling with:
//! - Configurable cost factor
//! - No silent truncation (bcrypt only reads 72 bytes, terminator included)
//! - Zeroization of clear-text passwords
//! - Constant-time comparison (provided by bcrypt)
//!
//! Hashes are stored in the modular crypt format (`$2b$<cost>$...`), which
//! embeds the salt and the cost, so verification needs nothing but the
//! stored string.

use std::fmt;

use bcrypt::BcryptError;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters, enforced at signup
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest password bcrypt hashes without truncation.
///
/// bcrypt reads 72 bytes and the NUL terminator counts as one of them.
pub const MAX_PASSWORD_BYTES: usize = 71;

/// Cost used when none is configured
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

// ============================================================================
// Error Types
// ============================================================================

/// Signup password policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Hashing failures
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Input longer than bcrypt can process
    #[error("Password exceeds the {max}-byte hashing limit (got {actual})")]
    InputTooLong { max: usize, actual: usize },

    #[error("Invalid bcrypt cost {0} (must be 4..=31)")]
    InvalidCost(u32),

    /// Randomness or internal failure
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl PasswordHashError {
    /// True when the caller's input caused the failure.
    pub fn is_input_error(&self) -> bool {
        matches!(self, PasswordHashError::InputTooLong { .. })
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone`
/// - Debug output is redacted
///
/// Unicode is NFKC-normalized on construction so that signup and login see
/// the same bytes for visually identical input.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new password for storage, enforcing the signup policy:
    /// - not empty / whitespace only
    /// - at least [`MIN_PASSWORD_LENGTH`] characters
    /// - at most [`MAX_PASSWORD_BYTES`] bytes after normalization
    /// - no control characters (space, tab and newline are allowed)
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::candidate(raw);
        let normalized = password.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: normalized.len(),
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Wrap a login attempt. No policy: a candidate only ever gets compared.
    pub fn candidate(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored hash. Not validated: a malformed value simply never
    /// verifies.
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_db(self) -> String {
        self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Stateless bcrypt hasher. Cheap to copy and safe to share across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash with a fresh random salt.
    ///
    /// Inputs over [`MAX_PASSWORD_BYTES`] fail instead of being truncated.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let bytes = password.as_bytes();
        let hash = bcrypt::non_truncating_hash(bytes, self.cost).map_err(|e| match e {
            BcryptError::Truncation(_) => PasswordHashError::InputTooLong {
                max: MAX_PASSWORD_BYTES,
                actual: bytes.len(),
            },
            other => PasswordHashError::HashingFailed(other.to_string()),
        })?;

        Ok(HashedPassword { hash })
    }

    /// Compare a candidate against a stored hash.
    ///
    /// Any failure (mismatch, malformed hash, oversized candidate) is `false`.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        bcrypt::non_truncating_verify(password.as_bytes(), &hashed.hash).unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================
