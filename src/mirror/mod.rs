//! Depth-first mirroring of a remote folder tree onto local storage.
//!
//! Each folder frame creates its local directory, lists the remote children
//! and handles them one at a time: excluded entries are skipped, folders are
//! recursed into, missing files are downloaded. Existing local files are
//! never touched. A failed download is logged and counted, everything else
//! that fails ends the run.

use std::path::Path;

use futures::future::BoxFuture;
use tracing::{debug, error, info, warn};

use crate::drive::{DriveBackend, RemoteNode};
use crate::error::{AppError, AppResult};
use crate::exclude::ExclusionRules;

/// Counters collected while mirroring.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MirrorReport {
    /// Folders visited, the root included
    pub folders_created: u64,
    pub files_downloaded: u64,
    pub bytes_downloaded: u64,
    /// Files skipped because they already exist locally
    pub files_existing: u64,
    pub folders_excluded: u64,
    pub files_excluded: u64,
    pub files_failed: u64,
    /// Entries whose title cannot be used as a path segment
    pub unsafe_names: u64,
}

/// Removes characters that cannot appear in a local path segment.
///
/// `:` and NUL are dropped entirely. `/` is replaced with `_` so a title can
/// never reach outside its parent directory or turn into several path
/// segments. Segment exclusion rules therefore see a title like `a/b` as the
/// single segment `a_b`, never as `a` and `b`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|&c| c != ':' && c != '\0')
        .map(|c| if c == '/' { '_' } else { c })
        .collect()
}

fn is_usable_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}

/// Mirrors the remote subtree rooted at `folder_id` into `dest`.
pub async fn mirror(
    backend: &dyn DriveBackend,
    folder_id: &str,
    dest: &Path,
    dir_rules: &ExclusionRules,
    file_rules: &ExclusionRules,
) -> AppResult<MirrorReport> {
    let mirror = Mirror {
        backend,
        dir_rules,
        file_rules,
    };
    let mut report = MirrorReport::default();
    mirror.folder(folder_id, dest, &mut report).await?;
    Ok(report)
}

struct Mirror<'a> {
    backend: &'a dyn DriveBackend,
    dir_rules: &'a ExclusionRules,
    file_rules: &'a ExclusionRules,
}

impl<'a> Mirror<'a> {
    fn folder<'b>(
        &'b self,
        folder_id: &'b str,
        dest: &'b Path,
        report: &'b mut MirrorReport,
    ) -> BoxFuture<'b, AppResult<()>> {
        Box::pin(async move {
            tokio::fs::create_dir_all(dest)
                .await
                .map_err(|source| AppError::CreateDir {
                    path: dest.to_path_buf(),
                    source,
                })?;
            report.folders_created += 1;

            let children = self
                .backend
                .list_children(folder_id)
                .await
                .map_err(|source| AppError::Listing {
                    folder_id: folder_id.to_string(),
                    source,
                })?;
            debug!(folder_id, dest = %dest.display(), children = children.len(), "listed folder");

            for child in &children {
                let fname = sanitize_title(&child.title);
                if !is_usable_segment(&fname) {
                    warn!(id = %child.id, title = %child.title, "Skipping entry with unusable name");
                    report.unsafe_names += 1;
                    continue;
                }

                if child.is_folder() {
                    if self.dir_rules.matches_exact(&fname) {
                        info!("Ignored directory \"{}\"...", fname);
                        report.folders_excluded += 1;
                        continue;
                    }
                    let new_dir = dest.join(&fname);
                    if let Some(rule) = self.dir_rules.first_segment_match(&new_dir) {
                        info!("Ignored directory {} per {} rule...", fname, rule);
                        report.folders_excluded += 1;
                        continue;
                    }
                    self.folder(&child.id, &new_dir, report).await?;
                } else {
                    self.file(child, &fname, dest, report).await;
                }
            }

            Ok(())
        })
    }

    async fn file(&self, node: &RemoteNode, fname: &str, dest: &Path, report: &mut MirrorReport) {
        let save_path = dest.join(fname);

        let exists = tokio::fs::metadata(&save_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if exists {
            info!("{} already exists!", save_path.display());
            report.files_existing += 1;
            return;
        }

        // Exact match uses the original title, the glob check the sanitized path
        if self.file_rules.matches_exact(&node.title) {
            info!("Ignored file {}...", save_path.display());
            report.files_excluded += 1;
            return;
        }
        if let Some(rule) = self.file_rules.first_segment_match(&save_path) {
            info!("Ignored file {} per {} rule...", fname, rule);
            report.files_excluded += 1;
            return;
        }

        info!("downloading to {}", save_path.display());
        match self.backend.download_file(&node.id, &save_path).await {
            Ok(bytes) => {
                report.files_downloaded += 1;
                report.bytes_downloaded += bytes;
            }
            Err(e) => {
                error!(file = %fname, error = %e, "Failed to download file \"{}\"", fname);
                report.files_failed += 1;
            }
        }
    }
}
