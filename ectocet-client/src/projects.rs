//! Project metadata

use crate::EctocetClient;
use crate::error::{ClientError, Result};
use ectocet_core::domain::project::Project;
use ectocet_core::dto::project::{ProjectData, ProjectVariables};

// `id` is requested so the API can compute `postSource`.
const GET_PROJECT: &str = r#"
  query($id: UUID!) {
    project(id: $id) {
      id
      namespace
      team {
        name
        namespace
      }
      postSource {
        fields
        url
      }
      builds(last: 1) {
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
      services {
        id
        name
        customDomain
      }
    }
  }
"#;

impl EctocetClient {
    /// Fetch a project's metadata, upload instructions and latest build
    ///
    /// Requires [`authenticate`](Self::authenticate) to have been called.
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let data: ProjectData = self
            .graphql("project", GET_PROJECT, ProjectVariables { id: project_id })
            .await?;

        data.project
            .ok_or_else(|| ClientError::NotFound(format!("project {project_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_project() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/graphql")
                    .header("authorization", "Bearer tok")
                    .json_body_partial(r#"{ "variables": { "id": "proj-1" } }"#);
                then.status(200).json_body(json!({
                    "data": {
                        "project": {
                            "id": "proj-1",
                            "namespace": "demo",
                            "team": { "name": "Acme", "namespace": "acme" },
                            "postSource": {
                                "fields": { "key": "k", "policy": "p" },
                                "url": "https://storage.example.com"
                            },
                            "builds": [{ "id": "b0", "result": { "error": null, "serviceBuilds": [] } }],
                            "services": [{ "id": "s1", "name": "web", "customDomain": null }]
                        }
                    }
                }));
            })
            .await;

        let mut client = EctocetClient::new(server.base_url());
        client.authenticate("tok");
        let project = client.get_project("proj-1").await.unwrap();

        mock.assert_async().await;
        assert_eq!(project.namespace, "demo");
        assert_eq!(project.team.namespace, "acme");
        assert_eq!(project.post_source.fields.len(), 2);
        assert!(!project.is_building());
        assert_eq!(project.services[0].name, "web");
    }

    #[tokio::test]
    async fn test_get_project_missing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/graphql");
                then.status(200).json_body(json!({ "data": { "project": null } }));
            })
            .await;

        let client = EctocetClient::new(server.base_url());
        let err = client.get_project("proj-1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
