//! Deployment API abstraction
//!
//! The deploy pipeline talks to the platform through this trait so that it
//! can be driven against an in-memory platform in tests.

use async_trait::async_trait;
use ectocet_core::Secret;
use ectocet_core::domain::build::Build;
use ectocet_core::domain::project::{PostSource, Project};

use crate::EctocetClient;
use crate::error::Result;

/// Remote operations needed to ship a project
#[async_trait]
pub trait DeployApi: Send + Sync {
    /// Exchange a secret for a bearer token (`None` if the secret is unknown)
    async fn exchange_token(&self, secret: &Secret) -> Result<Option<String>>;

    /// Attach the bearer token to all later calls
    fn authenticate(&mut self, token: String);

    /// Fetch project metadata
    async fn get_project(&self, project_id: &str) -> Result<Project>;

    /// Upload the source archive
    async fn upload_source(&self, post_source: &PostSource, archive: Vec<u8>) -> Result<()>;

    /// Create a build, returning its id
    async fn create_build(&self, project_id: &str) -> Result<String>;

    /// Fetch a build and its result
    async fn get_build(&self, build_id: &str) -> Result<Build>;
}

#[async_trait]
impl DeployApi for EctocetClient {
    async fn exchange_token(&self, secret: &Secret) -> Result<Option<String>> {
        EctocetClient::exchange_token(self, secret).await
    }

    fn authenticate(&mut self, token: String) {
        EctocetClient::authenticate(self, token);
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        EctocetClient::get_project(self, project_id).await
    }

    async fn upload_source(&self, post_source: &PostSource, archive: Vec<u8>) -> Result<()> {
        EctocetClient::upload_source(self, post_source, archive).await
    }

    async fn create_build(&self, project_id: &str) -> Result<String> {
        EctocetClient::create_build(self, project_id).await
    }

    async fn get_build(&self, build_id: &str) -> Result<Build> {
        EctocetClient::get_build(self, build_id).await
    }
}
