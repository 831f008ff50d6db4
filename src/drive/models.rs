//! Remote node types and the Drive API listing payload.

use serde::Deserialize;

use super::error::{DriveError, DriveResult};

/// MIME type Drive uses to mark folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Whether a remote node is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

/// One entry of a remote folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNode {
    /// Stable remote identifier
    pub id: String,
    /// Display name; may contain characters that are invalid locally
    pub title: String,
    pub kind: NodeKind,
}

impl RemoteNode {
    pub fn folder(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Folder,
        }
    }

    pub fn file(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::File,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

/// One page of `files.list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileListPage {
    #[serde(default)]
    pub items: Vec<ApiFile>,
    pub next_page_token: Option<String>,
}

/// A file resource as returned by the API, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiFile {
    pub id: Option<String>,
    pub title: Option<String>,
    pub mime_type: Option<String>,
}

impl TryFrom<ApiFile> for RemoteNode {
    type Error = DriveError;

    fn try_from(file: ApiFile) -> DriveResult<Self> {
        let id = match file.id {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(DriveError::InvalidResponse {
                    message: "listing item without 'id'".to_string(),
                })
            }
        };
        let title = file.title.ok_or_else(|| DriveError::InvalidResponse {
            message: format!("listing item '{id}' without 'title'"),
        })?;
        let kind = if file.mime_type.as_deref() == Some(FOLDER_MIME_TYPE) {
            NodeKind::Folder
        } else {
            NodeKind::File
        };
        Ok(Self { id, title, kind })
    }
}
