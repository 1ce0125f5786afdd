//! Credential resolution
//!
//! The secret comes from `ECTOCET_SECRET` when set, otherwise from a masked
//! prompt. It is validated once; there is no second prompt.

use std::io;

use ectocet_core::Secret;
use tracing::debug;

use crate::error::{DeployError, Result};

/// Source of interactively entered secrets
pub trait SecretPrompt {
    fn prompt(&self, label: &str) -> io::Result<String>;
}

/// Masked terminal prompt
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn prompt(&self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(format!("{label}: "))
    }
}

/// Resolves and validates the project secret
///
/// `from_env` wins over the prompt. A malformed secret fails with
/// [`DeployError::InvalidSecret`].
pub fn resolve_secret(from_env: Option<&str>, prompt: &dyn SecretPrompt) -> Result<Secret> {
    let raw = match from_env {
        Some(secret) => {
            debug!("Using secret from environment");
            secret.to_string()
        }
        None => prompt.prompt("Secret").map_err(DeployError::Prompt)?,
    };

    Secret::parse(&raw).map_err(|_| DeployError::InvalidSecret)
}
