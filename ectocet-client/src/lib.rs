//! Ectocet HTTP Client
//!
//! A small, type-safe client for the Ectocet platform API.
//!
//! The platform exposes a single GraphQL endpoint at `<origin>/api/graphql`.
//! Everything after the token exchange is authenticated with a bearer token;
//! source uploads go straight to a storage endpoint using pre-authorized
//! multipart fields.
//!
//! # Example
//!
//! ```no_run
//! use ectocet_client::EctocetClient;
//! use ectocet_core::{Secret, TokenClaims, UnverifiedClaims};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = EctocetClient::new("https://www.ectocet.com");
//!     let secret = Secret::parse("11111111-1111-4111-8111-111111111111")?;
//!
//!     let token = client.exchange_token(&secret).await?.expect("known secret");
//!     let project_id = UnverifiedClaims::decode(&token)?.subject().to_string();
//!     client.authenticate(token);
//!
//!     let project = client.get_project(&project_id).await?;
//!     println!("Deploying {}", project.namespace);
//!     Ok(())
//! }
//! ```

mod api;
mod auth;
mod builds;
pub mod error;
mod projects;
mod upload;

// Re-export commonly used types
pub use api::DeployApi;
pub use error::{ClientError, Result};

use ectocet_core::dto::{GraphQlRequest, GraphQlResponse};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the Ectocet platform API
///
/// Holds the base origin, the shared HTTP connection pool and, once
/// [`authenticate`](Self::authenticate) has been called, the bearer token
/// attached to every GraphQL request.
#[derive(Clone)]
pub struct EctocetClient {
    /// Origin of the platform (e.g., "https://www.ectocet.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token, set once after the token exchange
    token: Option<String>,
}

impl EctocetClient {
    /// Create a new client for `base_url`
    ///
    /// # Example
    /// ```
    /// use ectocet_client::EctocetClient;
    ///
    /// let client = EctocetClient::new("https://www.ectocet.com");
    /// assert_eq!(client.graphql_url(), "https://www.ectocet.com/api/graphql");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Get the origin of the platform
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the GraphQL endpoint
    pub fn graphql_url(&self) -> String {
        format!("{}/api/graphql", self.base_url)
    }

    /// Attach `token` as `Authorization: Bearer <token>` to all later requests
    pub fn authenticate(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Whether a bearer token is attached
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // =============================================================================
    // Request Handling
    // =============================================================================

    /// Run a GraphQL operation and return its `data`
    ///
    /// A non-2xx status becomes [`ClientError::ApiError`] with the response
    /// body as message. A non-empty `errors` array becomes
    /// [`ClientError::GraphQl`].
    async fn graphql<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        debug!(operation, authenticated = self.token.is_some(), "GraphQL request");

        let mut request = self
            .client
            .post(self.graphql_url())
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body: GraphQlResponse<T> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {operation} response: {e}"))
        })?;

        if let Some(message) = body.error_message() {
            return Err(ClientError::GraphQl(message));
        }

        body.data
            .ok_or_else(|| ClientError::ParseError(format!("{operation} response has no data")))
    }
}

impl std::fmt::Debug for EctocetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EctocetClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
