//! Client for the social posting API.
//!
//! Uploads use the API's two-step protocol: create an upload URL, then PUT
//! the file bytes to the signed URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use clipcast_models::{
    CreatePostRequest, CreateUploadUrlRequest, CreateUploadUrlResponse, Post, SocialAccount,
};

use crate::capabilities::{MediaUploader, PostCreator, UploadedMedia};
use crate::error::{ApiError, ApiResult};

const DEFAULT_BASE_URL: &str = "https://api.post-bridge.com/v1";

/// Posting API client with bearer authentication.
#[derive(Debug, Clone)]
pub struct PostBridgeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AccountsPage {
    data: Vec<SocialAccount>,
}

impl PostBridgeClient {
    /// Create a client for the given endpoint.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from `POSTBRIDGE_API_URL` / `POSTBRIDGE_API_KEY`.
    pub fn from_env() -> ApiResult<Self> {
        let api_key = std::env::var("POSTBRIDGE_API_KEY").map_err(|_| ApiError::MissingApiKey)?;
        let base_url =
            std::env::var("POSTBRIDGE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(base_url, api_key))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List connected social accounts.
    pub async fn list_accounts(&self) -> ApiResult<Vec<SocialAccount>> {
        let resp = self
            .http
            .get(self.url("/social-accounts"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let page: AccountsPage = check_json(resp).await?;
        Ok(page.data)
    }

    /// Request a signed upload URL for a new media item.
    pub async fn create_upload_url(
        &self,
        request: &CreateUploadUrlRequest,
    ) -> ApiResult<CreateUploadUrlResponse> {
        let resp = self
            .http
            .post(self.url("/media/create-upload-url"))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;
        check_json(resp).await
    }

    /// Create one scheduled post.
    pub async fn submit_post(&self, request: &CreatePostRequest) -> ApiResult<Post> {
        let resp = self
            .http
            .post(self.url("/posts"))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;
        check_json(resp).await
    }
}

/// Map a file extension to the API's supported MIME types.
fn mime_for_path(path: &Path) -> ApiResult<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => Ok("video/mp4"),
        "mov" => Ok("video/quicktime"),
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        other => Err(ApiError::UnsupportedMediaType(other.to_string())),
    }
}

/// Deserialize a JSON response, turning non-success statuses into
/// [`ApiError::Status`] with the upstream message.
async fn check_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::from_status_body(status.as_u16(), &body));
    }
    Ok(resp.json().await?)
}

#[async_trait]
impl MediaUploader for PostBridgeClient {
    async fn upload(&self, path: &Path, display_name: &str) -> ApiResult<UploadedMedia> {
        let mime = mime_for_path(path)?;
        let bytes = tokio::fs::read(path).await?;

        debug!(
            name = display_name,
            mime,
            size = bytes.len(),
            "Requesting upload URL"
        );

        let created = self
            .create_upload_url(&CreateUploadUrlRequest {
                name: display_name.to_string(),
                mime_type: mime.to_string(),
                size_bytes: bytes.len() as u64,
            })
            .await?;

        let put = self
            .http
            .put(&created.upload_url)
            .header("Content-Type", mime)
            .body(bytes)
            .send()
            .await?;

        if !put.status().is_success() {
            let status = put.status().as_u16();
            let body = put.text().await.unwrap_or_default();
            return Err(ApiError::from_status_body(status, &body));
        }

        info!(media_id = %created.media_id, name = display_name, "Media uploaded");
        Ok(UploadedMedia {
            media_id: created.media_id,
            name: created.name,
        })
    }
}

#[async_trait]
impl PostCreator for PostBridgeClient {
    async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<Post> {
        self.submit_post(request).await
    }
}
