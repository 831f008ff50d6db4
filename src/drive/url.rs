//! URL construction for Drive v2 endpoints.

use url::Url;

use super::error::{DriveError, DriveResult};

/// Fields requested from `files.list`; keeps responses small.
const LIST_FIELDS: &str = "items(id,title,mimeType),nextPageToken";

/// Escapes a value for use inside a single-quoted Drive query literal.
pub(crate) fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Query selecting the non-trashed direct children of a folder.
pub(crate) fn children_query(folder_id: &str) -> String {
    format!("'{}' in parents and trashed=false", escape_query_value(folder_id))
}

fn endpoint(base: &Url, segments: &[&str]) -> DriveResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DriveError::InvalidBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `GET {base}/files?q=...` for one page of a folder listing.
pub(crate) fn build_list_url(
    base: &Url,
    folder_id: &str,
    page_size: u32,
    page_token: Option<&str>,
) -> DriveResult<Url> {
    let mut url = endpoint(base, &["files"])?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("q", &children_query(folder_id))
            .append_pair("maxResults", &page_size.to_string())
            .append_pair("fields", LIST_FIELDS);
        if let Some(token) = page_token {
            query.append_pair("pageToken", token);
        }
    }
    Ok(url)
}

/// `GET {base}/files/{id}?alt=media` for a file's content.
pub(crate) fn build_download_url(base: &Url, file_id: &str) -> DriveResult<Url> {
    let mut url = endpoint(base, &["files", file_id])?;
    url.query_pairs_mut().append_pair("alt", "media");
    Ok(url)
}
