//! Source packaging
//!
//! Lists the project files the way git would see them from the project root
//! and packs exactly those files into an in-memory `.tar.gz`.
//!
//! Only git ignore sources apply, and only from the root down: ignore files
//! in enclosing directories are not read, whether or not the root is a
//! repository. Hidden files are kept, `.git` is not.

use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{DeployError, Result};

/// Compressed tarball of a project tree
#[derive(Debug, Clone)]
pub struct Archive {
    /// Paths of the archived files, relative to the project root
    pub files: Vec<PathBuf>,
    /// Gzip-compressed tar stream
    pub bytes: Vec<u8>,
}

/// Lists the files to ship, relative to `root`
///
/// Walk errors are returned rather than skipped, so the listing never
/// silently drops a file.
pub fn list_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .require_git(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        if entry.file_type().is_none_or(|kind| kind.is_dir()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .to_path_buf();
        files.push(relative);
    }

    Ok(files)
}

/// Packs `files` (relative to `root`) into a gzip-compressed tar stream
pub fn build_archive(root: &Path, files: &[PathBuf]) -> io::Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.mode(tar::HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    for file in files {
        builder.append_path_with_name(root.join(file), file)?;
    }

    builder.into_inner()?.finish()
}

/// Lists and packs `root` off the async runtime
pub async fn pack(root: &Path) -> Result<Archive> {
    let root = root.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let files = list_files(&root)?;
        let bytes = build_archive(&root, &files)?;
        debug!(files = files.len(), bytes = bytes.len(), "Packed sources");
        Ok::<_, io::Error>(Archive { files, bytes })
    })
    .await
    .map_err(|e| DeployError::Package(io::Error::other(format!("packaging task failed: {e}"))))?
    .map_err(DeployError::Package)
}
