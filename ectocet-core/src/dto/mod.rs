//! Data Transfer Objects for the platform API
//!
//! The platform speaks GraphQL over a single endpoint. This module holds the
//! request/response envelopes and, per operation, the variables sent and the
//! `data` shape received.

pub mod auth;
pub mod build;
pub mod project;

use serde::{Deserialize, Serialize};

/// GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// GraphQL response body
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// Single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Joined error messages, or `None` if the response carried no errors
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
