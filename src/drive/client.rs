//! Drive v2 client implementing the remote capability used by the mirror.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::error::{DriveError, DriveResult};
use super::http::{HttpBackend, ReqwestBackend};
use super::models::{FileListPage, RemoteNode};
use super::url::{build_download_url, build_list_url};
use super::DriveBackend;
use crate::config::DriveConfig;

/// Default Drive client using the reqwest HTTP backend.
pub type DefaultDriveClient = DriveClient<ReqwestBackend>;

/// Client for the Drive REST API, generic over the HTTP transport.
pub struct DriveClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
    page_size: u32,
}

impl DefaultDriveClient {
    /// Creates a client authenticated with an already-issued access token.
    pub fn new(config: &DriveConfig, access_token: &str) -> DriveResult<Self> {
        let backend =
            ReqwestBackend::new(access_token, Duration::from_secs(config.timeout_secs))?;
        Self::with_backend(&config.base_url, config.page_size, backend)
    }
}

impl<B: HttpBackend> DriveClient<B> {
    pub fn with_backend(base_url: &str, page_size: u32, backend: B) -> DriveResult<Self> {
        Ok(Self {
            backend,
            base_url: Url::parse(base_url)?,
            page_size,
        })
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }
}

/// Prefix of the staging files a download is written to before it is moved
/// onto its final name.
pub(crate) const STAGING_PREFIX: &str = ".drive-mirror-";

/// Creates a fresh staging file next to `dest`.
///
/// The name is random and created exclusively, so it never reuses a path
/// that already exists in the mirrored tree.
fn staging_file(dest: &Path) -> DriveResult<tempfile::NamedTempFile> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(".part")
        .tempfile_in(dir)?;
    Ok(staged)
}

#[async_trait]
impl<B: HttpBackend> DriveBackend for DriveClient<B> {
    async fn list_children(&self, folder_id: &str) -> DriveResult<Vec<RemoteNode>> {
        let mut nodes = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = build_list_url(&self.base_url, folder_id, self.page_size, page_token.as_deref())?;
            let page: FileListPage = self.backend.get_json(&url).await?;
            debug!(folder_id, items = page.items.len(), "listed page");

            for item in page.items {
                nodes.push(RemoteNode::try_from(item)?);
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) if page_token.as_deref() == Some(next.as_str()) => {
                    return Err(DriveError::InvalidResponse {
                        message: format!("page token '{next}' repeated for folder '{folder_id}'"),
                    });
                }
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(nodes)
    }

    async fn download_file(&self, file_id: &str, dest: &Path) -> DriveResult<u64> {
        let url = build_download_url(&self.base_url, file_id)?;
        // Dropping the staging file on any error path removes it from disk
        let staged = staging_file(dest)?;
        let bytes = self.backend.download(&url, staged.path()).await?;
        staged.persist_noclobber(dest).map_err(|e| e.error)?;
        Ok(bytes)
    }
}
