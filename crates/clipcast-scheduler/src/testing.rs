//! Scripted capability fakes shared by the orchestrator tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use clipcast_models::{ClipAsset, CreatePostRequest, Platform, Post, PostStatus, SocialAccount};
use clipcast_social::{
    ApiError, ApiResult, CaptionGenerator, GeneratedCaption, MediaUploader, PostCreator,
    UploadedMedia,
};

pub(crate) fn account(id: u64, username: &str) -> SocialAccount {
    SocialAccount {
        id,
        platform: Platform::Tiktok,
        username: username.to_string(),
    }
}

pub(crate) fn clip_assets(names: &[&str]) -> Vec<ClipAsset> {
    names
        .iter()
        .map(|name| ClipAsset::new(*name, *name, format!("/tmp/{}.mp4", name)))
        .collect()
}

/// Uploader that fails permanently (HTTP 400) for configured display names.
pub(crate) struct FakeUploader {
    fail: HashSet<String>,
    calls: AtomicU32,
}

impl FakeUploader {
    pub(crate) fn new() -> Self {
        Self {
            fail: HashSet::new(),
            calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn failing_for(mut self, name: &str) -> Self {
        self.fail.insert(name.to_string());
        self
    }

    pub(crate) fn upload_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(&self, _path: &Path, display_name: &str) -> ApiResult<UploadedMedia> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.contains(display_name) {
            return Err(ApiError::from_status_body(400, r#"{"error":"rejected"}"#));
        }
        Ok(UploadedMedia {
            media_id: format!("media-{}", display_name),
            name: display_name.to_string(),
        })
    }
}

/// Caption generator returning a deterministic caption, or always failing.
pub(crate) struct FakeCaptions {
    fail: bool,
}

impl FakeCaptions {
    pub(crate) fn new() -> Self {
        Self { fail: false }
    }

    pub(crate) fn always_failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl CaptionGenerator for FakeCaptions {
    async fn generate(
        &self,
        display_name: &str,
        _existing: &[String],
    ) -> ApiResult<GeneratedCaption> {
        if self.fail {
            return Err(ApiError::from_status_body(500, ""));
        }
        Ok(GeneratedCaption {
            es: format!("caption for {}", display_name),
            en: String::new(),
            title: display_name.to_string(),
        })
    }
}

/// Post creator recording every request; optionally fails the first
/// submission for one account with a permanent error.
pub(crate) struct FakePosts {
    requests: Mutex<Vec<CreatePostRequest>>,
    fail_account: Option<u64>,
    failures_left: AtomicU32,
}

impl FakePosts {
    pub(crate) fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_account: None,
            failures_left: AtomicU32::new(0),
        }
    }

    pub(crate) fn failing_once_for_account(mut self, account_id: u64) -> Self {
        self.fail_account = Some(account_id);
        self.failures_left = AtomicU32::new(1);
        self
    }

    /// All submission attempts, in order.
    pub(crate) fn requests(&self) -> Vec<CreatePostRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Scheduled times submitted for one account, in submission order.
    pub(crate) fn scheduled_times_for(&self, account_id: u64) -> Vec<DateTime<Utc>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.social_accounts.contains(&account_id))
            .map(|r| r.scheduled_at)
            .collect()
    }
}

#[async_trait]
impl PostCreator for FakePosts {
    async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<Post> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(target) = self.fail_account {
            if request.social_accounts.contains(&target)
                && self
                    .failures_left
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
            {
                return Err(ApiError::from_status_body(400, r#"{"error":"bad request"}"#));
            }
        }

        Ok(Post {
            id: format!("post-{}", self.requests.lock().unwrap().len()),
            caption: request.caption.clone(),
            scheduled_at: Some(request.scheduled_at),
            status: PostStatus::Scheduled,
            social_accounts: request.social_accounts.clone(),
            media: request.media.clone(),
        })
    }
}
