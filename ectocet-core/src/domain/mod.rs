//! Core domain types
//!
//! This module contains the entities the deployment client reads from and
//! drives on the platform. They are shared between the HTTP client (which
//! deserializes them) and the CLI (which sequences and reports them).

pub mod build;
pub mod project;
