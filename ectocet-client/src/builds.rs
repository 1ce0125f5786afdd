//! Build creation and polling

use crate::EctocetClient;
use crate::error::{ClientError, Result};
use ectocet_core::domain::build::Build;
use ectocet_core::dto::build::{
    BuildData, BuildVariables, CreateBuildData, CreateBuildVariables,
};

const CREATE_BUILD: &str = r#"
  mutation($projectId: UUID!) {
    createBuild(projectId: $projectId) {
      id
    }
  }
"#;

const GET_BUILD: &str = r#"
  query($id: UUID!) {
    build(id: $id) {
      id
      result {
        error {
          message
        }
        serviceBuilds {
          serviceId
        }
      }
    }
  }
"#;

impl EctocetClient {
    /// Trigger a build of the last uploaded sources
    ///
    /// # Returns
    /// The id of the new build
    pub async fn create_build(&self, project_id: &str) -> Result<String> {
        let data: CreateBuildData = self
            .graphql(
                "createBuild",
                CREATE_BUILD,
                CreateBuildVariables { project_id },
            )
            .await?;

        Ok(data.create_build.id)
    }

    /// Get a build and its result, if any
    pub async fn get_build(&self, build_id: &str) -> Result<Build> {
        let data: BuildData = self
            .graphql("build", GET_BUILD, BuildVariables { id: build_id })
            .await?;

        data.build
            .ok_or_else(|| ClientError::NotFound(format!("build {build_id}")))
    }
}
