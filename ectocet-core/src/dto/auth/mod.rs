//! Token exchange DTOs

use serde::{Deserialize, Serialize};

/// Variables of the `getProjectToken` query
#[derive(Debug, Clone, Serialize)]
pub struct ProjectTokenVariables<'a> {
    pub secret: &'a str,
}

/// `data` of the `getProjectToken` query
///
/// An unknown or revoked secret yields `null` (or an empty string).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTokenData {
    pub get_project_token: Option<String>,
}
