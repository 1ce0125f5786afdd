//! Deployment errors
//!
//! Every variant is fatal: the pipeline stops at the first error and nothing
//! already done is rolled back.

use std::io;

use ectocet_client::ClientError;
use ectocet_core::ClaimsError;
use ectocet_core::domain::build::TransitionError;
use thiserror::Error;

/// Result type alias for deploy operations
pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Debug, Error)]
pub enum DeployError {
    /// Malformed secret, or a secret the platform does not know
    #[error("Invalid secret")]
    InvalidSecret,

    #[error("Could not read secret: {0}")]
    Prompt(#[source] io::Error),

    #[error("Invalid project token: {0}")]
    Token(#[from] ClaimsError),

    /// The latest build of the project has no result yet
    #[error("Already building, wait for the current build to finish before deploying again")]
    AlreadyBuilding,

    #[error("Could not package sources: {0}")]
    Package(#[source] io::Error),

    /// Storage endpoint answered with an error status; holds the response body
    #[error("{0}")]
    UploadFailed(String),

    /// Build finished with an error; holds the platform's message
    #[error("{0}")]
    BuildFailed(String),

    #[error("Build {build_id} still running after {attempts} checks")]
    PollLimitReached { build_id: String, attempts: u32 },

    #[error(transparent)]
    State(#[from] TransitionError),

    /// Any other network or API failure
    #[error(transparent)]
    Transport(#[from] ClientError),
}

impl DeployError {
    /// Maps an upload failure: error statuses carry the storage response body
    pub fn from_upload(err: ClientError) -> Self {
        match err {
            ClientError::ApiError { message, .. } => DeployError::UploadFailed(message),
            other => DeployError::Transport(other),
        }
    }
}
