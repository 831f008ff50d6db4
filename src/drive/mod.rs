//! Remote storage capability.
//!
//! The mirror only sees the [`DriveBackend`] trait: list the non-trashed
//! children of a folder, and download one file to a local path. The Drive v2
//! implementation lives in [`client`]; authentication is out of scope and
//! arrives as a bearer token.

mod client;
mod error;
mod http;
mod models;
mod url;

use std::path::Path;

use async_trait::async_trait;

pub use client::{DefaultDriveClient, DriveClient};
pub use error::{DriveError, DriveResult};
pub use http::{HttpBackend, ReqwestBackend};
pub use models::{NodeKind, RemoteNode, FOLDER_MIME_TYPE};

/// The remote listing/download capability consumed by the mirror.
#[async_trait]
pub trait DriveBackend: Send + Sync {
    /// Non-trashed direct children of `folder_id`, in whatever order the
    /// remote returns them.
    async fn list_children(&self, folder_id: &str) -> DriveResult<Vec<RemoteNode>>;

    /// Fetches the full content of `file_id` into `dest`. Returns the number
    /// of bytes written.
    async fn download_file(&self, file_id: &str, dest: &Path) -> DriveResult<u64>;
}
