//! Build DTOs

use serde::{Deserialize, Serialize};

use crate::domain::build::Build;

/// Variables of the `createBuild` mutation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildVariables<'a> {
    pub project_id: &'a str,
}

/// Build id returned by `createBuild`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedBuild {
    pub id: String,
}

/// `data` of the `createBuild` mutation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildData {
    pub create_build: CreatedBuild,
}

/// Variables of the `build` query
#[derive(Debug, Clone, Serialize)]
pub struct BuildVariables<'a> {
    pub id: &'a str,
}

/// `data` of the `build` query
#[derive(Debug, Clone, Deserialize)]
pub struct BuildData {
    pub build: Option<Build>,
}
