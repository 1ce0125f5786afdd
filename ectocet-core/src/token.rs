//! Bearer token claims
//!
//! The platform hands out JWTs whose `sub` claim names the project the
//! secret belongs to. The client only reads the payload: the signature is
//! not checked here, transport security is the trust boundary.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading token claims
#[derive(Debug, Error)]
pub enum ClaimsError {
    /// The token does not have three dot-separated segments
    #[error("token is not a JWT")]
    NotAJwt,

    /// The payload segment is not valid base64url
    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The payload is not a JSON object with a string `sub`
    #[error("token payload is not valid JSON claims: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Read-only view over a token's claims
pub trait TokenClaims {
    /// Identifier of the resource the token was issued for
    fn subject(&self) -> &str;
}

/// Claims decoded without signature verification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnverifiedClaims {
    sub: String,
}

impl UnverifiedClaims {
    /// Decodes the payload segment of `token`
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(ClaimsError::NotAJwt),
        };

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl TokenClaims for UnverifiedClaims {
    fn subject(&self) -> &str {
        &self.sub
    }
}
