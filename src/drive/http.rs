//! HTTP transport for the Drive API.
//!
//! The client talks to the API through the `HttpBackend` trait so tests can
//! swap in canned responses. The production backend uses reqwest with a
//! bearer token and a per-request timeout. There are no retries.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use url::Url;

use super::error::{DriveError, DriveResult};

/// Trait for HTTP backends used by the Drive client.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> DriveResult<T>;

    /// Stream the response body of `url` into the file at `dest`, replacing
    /// its content. Returns the number of bytes written.
    async fn download(&self, url: &Url, dest: &Path) -> DriveResult<u64>;
}

/// Maps an HTTP status to the matching error; `Ok` for 2xx.
pub(crate) fn check_status(status: StatusCode, url: &Url) -> DriveResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let url = url.to_string();
    Err(match status.as_u16() {
        code @ (401 | 403) => DriveError::Unauthorized { status: code, url },
        404 => DriveError::NotFound { url },
        code => DriveError::ApiRequestFailed { status: code, url },
    })
}

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    access_token: String,
}

impl ReqwestBackend {
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> DriveResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            access_token: access_token.into(),
        })
    }

    async fn send(&self, url: &Url) -> DriveResult<reqwest::Response> {
        let response = self
            .client
            .get(url.as_str())
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        check_status(response.status(), url)?;
        Ok(response)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> DriveResult<T> {
        let response = self.send(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn download(&self, url: &Url, dest: &Path) -> DriveResult<u64> {
        let mut response = self.send(url).await?;
        let mut file = tokio::fs::File::create(dest).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://www.googleapis.com/drive/v2/files/X1?alt=media").unwrap()
    }

    #[test]
    fn success_status_passes() {
        assert!(check_status(StatusCode::OK, &url()).is_ok());
        assert!(check_status(StatusCode::PARTIAL_CONTENT, &url()).is_ok());
    }

    #[test]
    fn auth_statuses_are_unauthorized() {
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED, &url()),
            Err(DriveError::Unauthorized { status: 401, .. })
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN, &url()),
            Err(DriveError::Unauthorized { status: 403, .. })
        ));
    }

    #[test]
    fn not_found_status() {
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, &url()),
            Err(DriveError::NotFound { .. })
        ));
    }

    #[test]
    fn other_statuses_are_request_failures() {
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR, &url()),
            Err(DriveError::ApiRequestFailed { status: 500, .. })
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_REQUEST, &url()),
            Err(DriveError::ApiRequestFailed { status: 400, .. })
        ));
    }

    #[test]
    fn reqwest_backend_creation() {
        let backend = ReqwestBackend::new("token", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.access_token, "token");
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn fake_backend_returns_canned_json() {
            let backend = FakeHttp::new().with_json("files", json!({"items": []}));
            let value: serde_json::Value = backend.get_json(&url()).await.unwrap();
            assert_eq!(value["items"], json!([]));
            assert_eq!(backend.requests().len(), 1);
        }

        #[tokio::test]
        async fn fake_backend_returns_404_for_unknown_url() {
            let backend = FakeHttp::new();
            let result: DriveResult<serde_json::Value> = backend.get_json(&url()).await;
            assert!(matches!(result, Err(DriveError::NotFound { .. })));
        }

        #[tokio::test]
        async fn fake_backend_writes_download() {
            let dir = tempfile::TempDir::new().unwrap();
            let dest = dir.path().join("out.bin");
            let backend =
                FakeHttp::new().with_download("X1", CannedDownload::Body(b"hello".to_vec()));
            let n = backend.download(&url(), &dest).await.unwrap();
            assert_eq!(n, 5);
            assert_eq!(std::fs::read(&dest).unwrap(), b"hello");
        }
    }
}
