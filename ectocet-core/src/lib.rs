//! Ectocet Core
//!
//! Core types and abstractions for the Ectocet deployment client.
//!
//! This crate contains:
//! - Credentials: project secret validation and bearer token claims
//! - Domain types: Project, Build and the build state machine
//! - DTOs: GraphQL envelopes and per-operation payloads

pub mod domain;
pub mod dto;
pub mod secret;
pub mod token;

pub use secret::{Secret, SecretError};
pub use token::{ClaimsError, TokenClaims, UnverifiedClaims};
