//! In-memory platform for pipeline tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ectocet_client::{ClientError, DeployApi, Result};
use ectocet_core::Secret;
use ectocet_core::domain::build::{Build, BuildError, BuildResult, ServiceBuild};
use ectocet_core::domain::project::{PostSource, Project, Service, Team};
use tokio::time::Instant;

pub const SECRET: &str = "11111111-1111-4111-8111-111111111111";

/// Remote call, as recorded by [`FakePlatform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ExchangeToken,
    Authenticate,
    GetProject(String),
    Upload,
    CreateBuild(String),
    GetBuild(String),
}

pub fn jwt(sub: &str) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{sub}"}}"#))
    )
}

pub fn result_ok(service_ids: &[&str]) -> BuildResult {
    BuildResult {
        error: None,
        service_builds: service_ids
            .iter()
            .map(|id| ServiceBuild {
                service_id: id.to_string(),
            })
            .collect(),
    }
}

pub fn result_error(message: &str) -> BuildResult {
    BuildResult {
        error: Some(BuildError {
            message: message.to_string(),
        }),
        service_builds: vec![],
    }
}

/// Scripted platform recording every call made against it
///
/// Polls pop scripted results in order; once the script runs out the build
/// stays pending.
pub struct FakePlatform {
    token: Option<String>,
    project: Project,
    upload_error: Option<(u16, String)>,
    poll_error: bool,
    poll_delay: Duration,
    poll_timings: Mutex<Vec<(Instant, Instant)>>,
    polls: Mutex<VecDeque<Option<BuildResult>>>,
    authenticated: bool,
    builds_created: Mutex<u32>,
    uploaded: Mutex<Option<Vec<u8>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            token: Some(jwt("proj-1")),
            project: Project {
                id: "proj-1".to_string(),
                namespace: "demo".to_string(),
                team: Team {
                    name: "Acme".to_string(),
                    namespace: "acme".to_string(),
                },
                post_source: PostSource {
                    fields: Default::default(),
                    url: "https://storage.example.com/bucket".to_string(),
                },
                builds: vec![Build {
                    id: "build-0".to_string(),
                    result: Some(result_ok(&["s1"])),
                }],
                services: vec![Service {
                    id: "s1".to_string(),
                    name: "web".to_string(),
                    custom_domain: None,
                }],
            },
            upload_error: None,
            poll_error: false,
            poll_delay: Duration::ZERO,
            poll_timings: Mutex::new(Vec::new()),
            polls: Mutex::new(VecDeque::new()),
            authenticated: false,
            builds_created: Mutex::new(0),
            uploaded: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn with_raw_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_pending_build(mut self) -> Self {
        self.project.builds = vec![Build {
            id: "build-0".to_string(),
            result: None,
        }];
        self
    }

    pub fn with_upload_status(mut self, status: u16, body: &str) -> Self {
        self.upload_error = Some((status, body.to_string()));
        self
    }

    pub fn with_poll_failure(mut self) -> Self {
        self.poll_error = true;
        self
    }

    /// Makes every build check take `delay` to answer
    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    pub fn with_polls(self, polls: Vec<Option<BuildResult>>) -> Self {
        *self.polls.lock().unwrap() = polls.into();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::GetBuild(_)))
            .count()
    }

    /// When each build check was received and answered
    pub fn poll_timings(&self) -> Vec<(Instant, Instant)> {
        self.poll_timings.lock().unwrap().clone()
    }

    pub fn remaining_polls(&self) -> usize {
        self.polls.lock().unwrap().len()
    }

    pub fn uploaded_archive(&self) -> Option<Vec<u8>> {
        self.uploaded.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn require_token(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(ClientError::api_error(401, "missing bearer token"))
        }
    }
}

#[async_trait]
impl DeployApi for FakePlatform {
    async fn exchange_token(&self, secret: &Secret) -> Result<Option<String>> {
        self.record(Call::ExchangeToken);
        if secret.expose() != SECRET {
            return Ok(None);
        }
        Ok(self.token.clone())
    }

    fn authenticate(&mut self, _token: String) {
        self.record(Call::Authenticate);
        self.authenticated = true;
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.record(Call::GetProject(project_id.to_string()));
        self.require_token()?;
        if project_id != self.project.id {
            return Err(ClientError::NotFound(format!("project {project_id}")));
        }
        Ok(self.project.clone())
    }

    async fn upload_source(&self, _post_source: &PostSource, archive: Vec<u8>) -> Result<()> {
        self.record(Call::Upload);
        if let Some((status, body)) = &self.upload_error {
            return Err(ClientError::api_error(*status, body.clone()));
        }
        *self.uploaded.lock().unwrap() = Some(archive);
        Ok(())
    }

    async fn create_build(&self, project_id: &str) -> Result<String> {
        self.record(Call::CreateBuild(project_id.to_string()));
        self.require_token()?;
        let mut created = self.builds_created.lock().unwrap();
        *created += 1;
        Ok(format!("build-{created}"))
    }

    async fn get_build(&self, build_id: &str) -> Result<Build> {
        self.record(Call::GetBuild(build_id.to_string()));
        let received = Instant::now();
        if !self.poll_delay.is_zero() {
            tokio::time::sleep(self.poll_delay).await;
        }
        self.poll_timings
            .lock()
            .unwrap()
            .push((received, Instant::now()));
        self.require_token()?;
        if self.poll_error {
            return Err(ClientError::api_error(500, "internal error"));
        }
        let result = self.polls.lock().unwrap().pop_front().flatten();
        Ok(Build {
            id: build_id.to_string(),
            result,
        })
    }
}
