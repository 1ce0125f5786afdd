//! Source upload
//!
//! Sources are posted directly to the storage endpoint named by the project's
//! `postSource`. The request carries no bearer token: the pre-authorized form
//! fields are the credential.

use crate::EctocetClient;
use crate::error::{ClientError, Result};
use ectocet_core::domain::project::PostSource;
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// Name of the multipart field holding the archive
pub(crate) const FILE_FIELD: &str = "file";

const ARCHIVE_NAME: &str = "source.tar.gz";

/// Build the upload form
///
/// Authorization fields come first, in the order the platform sent them,
/// followed by the archive with an explicit length.
pub(crate) fn upload_form(post_source: &PostSource, archive: Vec<u8>) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in &post_source.fields {
        form = form.text(name.clone(), value.clone());
    }

    let length = archive.len() as u64;
    let part = Part::stream_with_length(Body::from(archive), length)
        .file_name(ARCHIVE_NAME)
        .mime_str("application/gzip")?;

    Ok(form.part(FILE_FIELD, part))
}

impl EctocetClient {
    /// Upload a source archive using pre-authorized form fields
    ///
    /// Any non-error status is a success. An error status is returned as
    /// [`ClientError::ApiError`] whose message is the response body.
    pub async fn upload_source(&self, post_source: &PostSource, archive: Vec<u8>) -> Result<()> {
        debug!(
            url = %post_source.url,
            fields = post_source.fields.len(),
            bytes = archive.len(),
            "Uploading sources"
        );

        let form = upload_form(post_source, archive)?;
        let response = self
            .client
            .post(&post_source.url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
