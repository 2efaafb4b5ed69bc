//! Secret name type.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated secret name: 1 to 255 characters of `[A-Za-z0-9_-]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SecretName(String);

impl SecretName {
    /// Create a new secret name, validating the format.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        if s.is_empty() || s.len() > 255 {
            return Err(InvalidInputError::SecretName {
                value: s,
                reason: "must be 1 to 255 characters".to_string(),
            }
            .into());
        }

        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
        {
            return Err(InvalidInputError::SecretName {
                reason: format!("contains invalid character '{}'", c),
                value: s,
            }
            .into());
        }

        Ok(Self(s))
    }

    /// Returns the secret name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SecretName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(SecretName::new("people-store-credentials").is_ok());
        assert!(SecretName::new("DB_KEY_2").is_ok());
    }

    #[test]
    fn invalid_names() {
        assert!(SecretName::new("").is_err());
        assert!(SecretName::new("a/b").is_err());
        assert!(SecretName::new("has space").is_err());
        assert!(SecretName::new("x".repeat(256)).is_err());
    }
}
