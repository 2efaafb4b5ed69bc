//! National id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated national id, the key a person record is stored under.
///
/// # Example
///
/// ```
/// use people_core::NationalId;
///
/// let id = NationalId::new("A123").unwrap();
/// assert_eq!(id.as_str(), "A123");
/// assert!(NationalId::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Maximum length of a national id in bytes.
    ///
    /// The file store keeps each record in a single `{id}.json` file, and
    /// filename components are capped at 255 bytes.
    pub const MAX_LEN: usize = 250;

    /// Create a new national id, validating that it is usable as a store key.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, too long, contains `/` or
    /// control characters, or is `.` / `..`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let reason = if s.is_empty() {
            Some("cannot be empty".to_string())
        } else if s.len() > Self::MAX_LEN {
            Some(format!("exceeds maximum length of {} bytes", Self::MAX_LEN))
        } else if s == "." || s == ".." {
            Some("cannot be '.' or '..'".to_string())
        } else if let Some(c) = s.chars().find(|c| *c == '/' || *c == '\\' || c.is_control()) {
            Some(format!("contains invalid character {:?}", c))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(InvalidInputError::NationalId {
                value: s.to_string(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NationalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for NationalId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> Self {
        id.0
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
