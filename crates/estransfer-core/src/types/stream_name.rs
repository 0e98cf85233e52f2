//! Stream name type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated stream name.
///
/// Stream names are free-form except that they cannot be empty and cannot
/// contain `/`, which would change the meaning of the stream URL.
///
/// # Example
///
/// ```
/// use estransfer_core::StreamName;
///
/// let name = StreamName::new("order-42").unwrap();
/// assert_eq!(name.as_str(), "order-42");
/// assert!(StreamName::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamName(String);

impl StreamName {
    /// Name of the system stream that indexes every stream.
    pub const ALL_STREAMS: &'static str = "$streams";

    /// Create a new stream name, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or contains `/`.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// The `$streams` index stream.
    pub fn all_streams() -> Self {
        Self(Self::ALL_STREAMS.to_string())
    }

    /// Returns the stream name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        if s.is_empty() {
            return Err(InvalidInputError::StreamName {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s.contains('/') {
            return Err(InvalidInputError::StreamName {
                value: s.to_string(),
                reason: "'/' is a forbidden character".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StreamName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StreamName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StreamName> for String {
    fn from(name: StreamName) -> Self {
        name.0
    }
}

impl AsRef<str> for StreamName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
