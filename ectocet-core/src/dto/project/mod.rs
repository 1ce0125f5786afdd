//! Project query DTOs

use serde::{Deserialize, Serialize};

use crate::domain::project::Project;

/// Variables of the `project` query
#[derive(Debug, Clone, Serialize)]
pub struct ProjectVariables<'a> {
    pub id: &'a str,
}

/// `data` of the `project` query
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectData {
    pub project: Option<Project>,
}
