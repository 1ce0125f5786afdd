//! Build poller
//!
//! Drives one build from creation to a terminal result. Each check waits
//! one full interval after the previous response (or after creation), so a
//! slow platform never gets back-to-back requests. Polling stops at the
//! first result, success or error.

use ectocet_client::DeployApi;
use ectocet_core::domain::build::{BuildEvent, BuildResult, BuildState, TransitionError};
use tokio::time;
use tracing::{debug, info};

use crate::config::PollSettings;
use crate::error::{DeployError, Result};

/// Polls a build until it succeeds or fails
pub struct BuildPoller<'a, A: DeployApi + ?Sized> {
    api: &'a A,
    settings: &'a PollSettings,
}

impl<'a, A: DeployApi + ?Sized> BuildPoller<'a, A> {
    pub fn new(api: &'a A, settings: &'a PollSettings) -> Self {
        Self { api, settings }
    }

    /// Creates a build of `project_id` and waits for its result
    ///
    /// Returns the build id with the successful result. A build error
    /// becomes [`DeployError::BuildFailed`]; any request error aborts the
    /// wait immediately.
    pub async fn run(&self, project_id: &str) -> Result<(String, BuildResult)> {
        let build_id = self.api.create_build(project_id).await?;
        info!(%build_id, "Build created");

        let state = BuildState::NotStarted.advance(BuildEvent::Created(build_id.clone()))?;
        let result = self.wait(state).await?;
        Ok((build_id, result))
    }

    /// Polls from a pending state until a terminal one
    async fn wait(&self, mut state: BuildState) -> Result<BuildResult> {
        loop {
            let (build_id, polls) = match &state {
                BuildState::Pending { build_id, polls } => (build_id.clone(), *polls),
                _ => break,
            };

            if self.settings.max_attempts.is_some_and(|max| polls >= max) {
                return Err(DeployError::PollLimitReached {
                    build_id,
                    attempts: polls,
                });
            }

            time::sleep(self.settings.interval).await;

            debug!(%build_id, poll = polls + 1, "Checking build result");
            let build = self.api.get_build(&build_id).await?;
            state = state.advance(BuildEvent::Polled(build.result))?;
        }

        info!(state = %state, "Build finished");
        match state {
            BuildState::Succeeded { result, .. } => Ok(result),
            BuildState::Failed { message, .. } => Err(DeployError::BuildFailed(message)),
            other => Err(TransitionError {
                state: other.name(),
                event: "finished",
            }
            .into()),
        }
    }
}
