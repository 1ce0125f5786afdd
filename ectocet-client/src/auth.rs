//! Token exchange

use crate::EctocetClient;
use crate::error::Result;
use ectocet_core::Secret;
use ectocet_core::dto::auth::{ProjectTokenData, ProjectTokenVariables};

const GET_PROJECT_TOKEN: &str = r#"
  query($secret: UUID!) {
    getProjectToken(secret: $secret)
  }
"#;

impl EctocetClient {
    /// Exchange a project secret for a bearer token
    ///
    /// This call is unauthenticated. Returns `Ok(None)` when the platform
    /// does not know the secret (null or empty token).
    pub async fn exchange_token(&self, secret: &Secret) -> Result<Option<String>> {
        let data: ProjectTokenData = self
            .graphql(
                "getProjectToken",
                GET_PROJECT_TOKEN,
                ProjectTokenVariables {
                    secret: secret.expose(),
                },
            )
            .await?;

        Ok(data.get_project_token.filter(|token| !token.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::jwt;
    use httpmock::prelude::*;
    use serde_json::json;

    const SECRET: &str = "11111111-1111-4111-8111-111111111111";

    async fn exchange(answer: serde_json::Value) -> Option<String> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/graphql")
                    .json_body_partial(format!(r#"{{ "variables": {{ "secret": "{SECRET}" }} }}"#));
                then.status(200)
                    .json_body(json!({ "data": { "getProjectToken": answer } }));
            })
            .await;

        let client = EctocetClient::new(server.base_url());
        let token = client
            .exchange_token(&Secret::parse(SECRET).unwrap())
            .await
            .unwrap();
        mock.assert_async().await;
        token
    }

    #[tokio::test]
    async fn test_exchange_returns_token() {
        let token = jwt("proj-1");
        assert_eq!(exchange(json!(token.clone())).await, Some(token));
    }

    #[tokio::test]
    async fn test_exchange_null_or_empty_is_unknown_secret() {
        assert_eq!(exchange(json!(null)).await, None);
        assert_eq!(exchange(json!("")).await, None);
    }
}
