//! User Name Value Object
//!
//! The display name shown next to a user's posts. It is not an identifier:
//! login goes through the email, so names are not unique.
//!
//! ## Processing
//! NFKC normalization → trim → validation. Case is preserved.
//!
//! ## Invariants
//! - Non-empty after normalization
//! - At most `USER_NAME_MAX_LENGTH` characters
//! - No control characters

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains a control character
    ControlCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username is required"),
            Self::TooLong { length, max } => {
                write!(f, "username is too long ({length} chars, maximum {max})")
            }
            Self::ControlCharacter { position } => {
                write!(f, "username contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Create a new UserName from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(position) = trimmed.chars().position(char::is_control) {
            return Err(UserNameError::ControlCharacter { position });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert_eq!(UserName::new("alice").unwrap().as_str(), "alice");
        assert_eq!(UserName::new("  Alice Smith ").unwrap().as_str(), "Alice Smith");
        assert!(UserName::new("山田太郎").is_ok());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width Latin letters fold to ASCII
        assert_eq!(UserName::new("ａｌｉｃｅ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_empty_user_name() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_too_long_user_name() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(long),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            UserName::new("ali\u{0000}ce"),
            Err(UserNameError::ControlCharacter { position: 3 })
        );
    }

    #[test]
    fn test_serde_validates() {
        let name: UserName = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(name.as_str(), "bob");
        assert!(serde_json::from_str::<UserName>("\"  \"").is_err());
    }
}
