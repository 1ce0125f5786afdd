//! Deploy pipeline
//!
//! secret -> token -> project -> archive -> upload -> build -> result.
//!
//! Stages run strictly in sequence and the first error aborts the run.
//! Nothing is retried and nothing already done is undone: an uploaded
//! archive stays uploaded if the build cannot be created.

use std::future::Future;
use std::path::Path;

use ectocet_client::DeployApi;
use ectocet_core::domain::build::BuildResult;
use ectocet_core::domain::project::Project;
use ectocet_core::{Secret, TokenClaims, UnverifiedClaims};
use tracing::info;

use crate::config::PollSettings;
use crate::error::{DeployError, Result};
use crate::packager;
use crate::poller::BuildPoller;
use crate::ui::{self, Stage};

/// Outcome of a successful deployment
#[derive(Debug, Clone)]
pub struct Deployment {
    pub project: Project,
    pub build_id: String,
    pub result: BuildResult,
}

/// Runs `step`, closing the stage line with a success or failure marker
async fn stage<T>(stage: Stage, step: impl Future<Output = Result<T>>) -> Result<T> {
    ui::stage_started(stage);
    let outcome = step.await;
    match &outcome {
        Ok(_) => ui::stage_done(),
        Err(_) => ui::stage_failed(),
    }
    outcome
}

/// Exchanges the secret, then fetches the project it belongs to
///
/// Leaves `api` authenticated. Refuses to continue while the project's
/// latest build is still pending; that check is advisory, a concurrent
/// trigger from elsewhere can still slip in.
async fn fetch_project<A: DeployApi + ?Sized>(api: &mut A, secret: &Secret) -> Result<Project> {
    let token = api
        .exchange_token(secret)
        .await?
        .ok_or(DeployError::InvalidSecret)?;

    let project_id = UnverifiedClaims::decode(&token)?.subject().to_string();
    api.authenticate(token);
    info!(%project_id, "Authenticated");

    let project = api.get_project(&project_id).await?;
    if project.is_building() {
        return Err(DeployError::AlreadyBuilding);
    }

    Ok(project)
}

/// Ships `project_dir` and waits for the resulting build
pub async fn deploy<A: DeployApi + ?Sized>(
    api: &mut A,
    secret: &Secret,
    project_dir: &Path,
    poll: &PollSettings,
) -> Result<Deployment> {
    let project = stage(Stage::ProjectInfo, fetch_project(api, secret)).await?;
    ui::detail(format!("{} / {}", project.team.name, project.namespace));

    let archive = stage(Stage::Package, packager::pack(project_dir)).await?;
    ui::detail(format!(
        "{} files, {} bytes",
        archive.files.len(),
        archive.bytes.len()
    ));

    let api = &*api;
    let post_source = &project.post_source;
    let bytes = archive.bytes;
    stage(Stage::Upload, async move {
        api.upload_source(post_source, bytes)
            .await
            .map_err(DeployError::from_upload)
    })
    .await?;

    let (build_id, result) =
        stage(Stage::Build, BuildPoller::new(api, poll).run(&project.id)).await?;

    Ok(Deployment {
        project,
        build_id,
        result,
    })
}
