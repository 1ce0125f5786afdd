//! Project secret
//!
//! The secret is the only credential an operator holds. It is a canonical,
//! lowercase, hyphenated UUID v4 with an RFC 4122 variant nibble.

use std::fmt;

use thiserror::Error;
use uuid::{Uuid, Variant};

/// Errors raised while validating a secret
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    /// The input is not a canonical UUID v4
    #[error("Invalid secret")]
    Malformed,
}

/// A validated project secret
///
/// Never printed: both `Debug` and `Display` are redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Validates `input` and wraps it
    ///
    /// Accepts exactly `xxxxxxxx-xxxx-4xxx-[89ab]xxx-xxxxxxxxxxxx` in lowercase hex.
    /// Braced, simple, URN or uppercase forms are rejected even though they
    /// denote the same UUID.
    pub fn parse(input: &str) -> Result<Self, SecretError> {
        let uuid = Uuid::try_parse(input).map_err(|_| SecretError::Malformed)?;

        if uuid.hyphenated().to_string() != input {
            return Err(SecretError::Malformed);
        }

        if uuid.get_version_num() != 4 || uuid.get_variant() != Variant::RFC4122 {
            return Err(SecretError::Malformed);
        }

        Ok(Self(input.to_string()))
    }

    /// The raw secret, for the token exchange request only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
