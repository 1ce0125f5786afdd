//! Build domain types and the build state machine

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Build record
///
/// `result` stays `None` while the platform is still building.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Build {
    pub id: String,
    pub result: Option<BuildResult>,
}

impl Build {
    /// Whether this build has not reached a terminal state
    pub fn is_pending(&self) -> bool {
        self.result.is_none()
    }
}

/// Terminal outcome of a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub error: Option<BuildError>,
    #[serde(default)]
    pub service_builds: Vec<ServiceBuild>,
}

/// Error payload of a failed build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildError {
    pub message: String,
}

/// Per-service outcome of a successful build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBuild {
    pub service_id: String,
}

/// Something observed about a build from the outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// The build creation call returned this id
    Created(String),
    /// A poll returned this result (`None` while pending)
    Polled(Option<BuildResult>),
}

impl BuildEvent {
    fn name(&self) -> &'static str {
        match self {
            BuildEvent::Created(_) => "created",
            BuildEvent::Polled(_) => "polled",
        }
    }
}

/// Event that does not apply to the current state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot apply '{event}' to a build in state {state}")]
pub struct TransitionError {
    pub state: &'static str,
    pub event: &'static str,
}

/// Lifecycle of one build, as seen by the client
///
/// `NotStarted -> Pending -> {Succeeded, Failed}`. Terminal states accept no
/// further events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildState {
    NotStarted,
    Pending { build_id: String, polls: u32 },
    Succeeded { build_id: String, result: BuildResult },
    Failed { build_id: String, message: String },
}

impl BuildState {
    /// Applies `event`, returning the next state
    pub fn advance(self, event: BuildEvent) -> Result<Self, TransitionError> {
        match (self, event) {
            (BuildState::NotStarted, BuildEvent::Created(build_id)) => {
                Ok(BuildState::Pending { build_id, polls: 0 })
            }
            (BuildState::Pending { build_id, polls }, BuildEvent::Polled(None)) => {
                Ok(BuildState::Pending {
                    build_id,
                    polls: polls + 1,
                })
            }
            (BuildState::Pending { build_id, .. }, BuildEvent::Polled(Some(result))) => {
                Ok(match result.error {
                    Some(error) => BuildState::Failed {
                        build_id,
                        message: error.message,
                    },
                    None => BuildState::Succeeded { build_id, result },
                })
            }
            (state, event) => Err(TransitionError {
                state: state.name(),
                event: event.name(),
            }),
        }
    }

    /// Whether polling should stop
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildState::Succeeded { .. } | BuildState::Failed { .. }
        )
    }

    /// The build id, once the build exists
    pub fn build_id(&self) -> Option<&str> {
        match self {
            BuildState::NotStarted => None,
            BuildState::Pending { build_id, .. }
            | BuildState::Succeeded { build_id, .. }
            | BuildState::Failed { build_id, .. } => Some(build_id),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildState::NotStarted => "NotStarted",
            BuildState::Pending { .. } => "Pending",
            BuildState::Succeeded { .. } => "Succeeded",
            BuildState::Failed { .. } => "Failed",
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
