//! Project domain types

use indexmap::IndexMap;
use serde::Deserialize;

use crate::domain::build::Build;

/// Deployable project as returned by the project query
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub namespace: String,
    pub team: Team,
    pub post_source: PostSource,
    /// Most recent build first; the query asks for the last one only
    #[serde(default)]
    pub builds: Vec<Build>,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// Team owning a project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Team {
    pub name: String,
    pub namespace: String,
}

/// Pre-authorized upload instructions
///
/// `fields` keeps the order the platform sent them in. Storage backends
/// check the policy fields positionally, so they are replayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostSource {
    pub fields: IndexMap<String, String>,
    pub url: String,
}

/// Service deployed as part of a project
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub custom_domain: Option<String>,
}

impl Project {
    /// The most recent build, if any
    pub fn latest_build(&self) -> Option<&Build> {
        self.builds.first()
    }

    /// Whether the most recent build has not produced a result yet
    ///
    /// Best effort only: another client can trigger a build between this
    /// check and our own build creation.
    pub fn is_building(&self) -> bool {
        self.latest_build().is_some_and(Build::is_pending)
    }

    /// Looks up a service by id
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }
}
