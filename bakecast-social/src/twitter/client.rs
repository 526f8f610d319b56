//! Twitter/X client for posting a status with one image.
//!
//! Media goes through the v1.1 upload host (multipart), statuses through the
//! v2 `tweets` endpoint. Both are signed with the account's OAuth 1.0a
//! credentials; nothing is retried.
use crate::twitter::oauth::{OAuthSigner, TwitterCredentials};
use crate::twitter::types::{
    CreateTweet, CreateTweetResponse, CreatedTweet, MediaUpload, TweetMedia, User, UserResponse,
};
use anyhow::{Context, Result};
use bakecast_http::{Auth, HttpClient, RequestOpts};
use reqwest::header::HeaderValue;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

const API_BASE: &str = "https://api.twitter.com/";
const UPLOAD_BASE: &str = "https://upload.twitter.com/";

const USERS_ME: &str = "2/users/me";
const TWEETS: &str = "2/tweets";
const MEDIA_UPLOAD: &str = "1.1/media/upload.json";

#[derive(Clone)]
pub struct TwitterApi {
    api: HttpClient,
    upload: HttpClient,
    signer: OAuthSigner,
}

impl TwitterApi {
    pub fn new(creds: TwitterCredentials) -> Result<Self> {
        Self::with_base_urls(creds, API_BASE, UPLOAD_BASE)
    }

    /// Point both hosts somewhere else (tests, proxies).
    pub fn with_base_urls(creds: TwitterCredentials, api_base: &str, upload_base: &str) -> Result<Self> {
        let api = HttpClient::new(api_base).context("twitter api base url")?;
        let upload = HttpClient::new(upload_base).context("twitter upload base url")?;
        Ok(Self {
            api,
            upload,
            signer: OAuthSigner::new(creds),
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.api = self.api.with_timeout(dur);
        self.upload = self.upload.with_timeout(dur);
        self
    }

    fn signed(&self, http: &HttpClient, method: &str, path: &str) -> Result<RequestOpts<'static>> {
        let url = http.resolve(path, false)?;
        let header = self.signer.authorization(method, &url, &[]);
        let value = HeaderValue::from_str(&header).context("oauth header is not ASCII")?;
        Ok(RequestOpts {
            auth: Some(Auth::authorization(value)),
            ..Default::default()
        })
    }

    /// Check the credentials by asking who they belong to.
    pub async fn verify_credentials(&self) -> Result<User> {
        let opts = self.signed(&self.api, "GET", USERS_ME)?;
        let resp: UserResponse = self
            .api
            .get_json(USERS_ME, opts)
            .await
            .context("twitter: verify credentials")?;
        tracing::debug!(user_id = %resp.data.id, username = %resp.data.username, "twitter.authenticated");
        Ok(resp.data)
    }

    /// Upload an in-memory image and return the platform's media handle.
    pub async fn upload_media(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        mime: &str,
    ) -> Result<MediaUpload> {
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .with_context(|| format!("invalid media type {mime}"))?;
        let form = Form::new().part("media", part);

        let opts = self.signed(&self.upload, "POST", MEDIA_UPLOAD)?;
        let resp: MediaUpload = self
            .upload
            .post_multipart(MEDIA_UPLOAD, form, opts)
            .await
            .context("twitter: media upload")?;
        tracing::debug!(media_id = %resp.media_id_string, size, "twitter.media.uploaded");
        Ok(resp)
    }

    /// Read an image from disk and upload it.
    pub async fn upload_media_file(&self, path: &Path) -> Result<MediaUpload> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("read media file {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("media.jpg")
            .to_string();
        let mime = mime_for(path);
        self.upload_media(bytes, &file_name, mime).await
    }

    /// Publish a status, attaching previously uploaded media ids.
    pub async fn create_tweet(&self, text: &str, media_ids: &[String]) -> Result<CreatedTweet> {
        let body = CreateTweet {
            text: text.to_string(),
            media: (!media_ids.is_empty()).then(|| TweetMedia {
                media_ids: media_ids.to_vec(),
            }),
        };
        let opts = self.signed(&self.api, "POST", TWEETS)?;
        let resp: CreateTweetResponse = self
            .api
            .post_json_opts(TWEETS, &body, opts)
            .await
            .context("twitter: create tweet")?;
        tracing::debug!(tweet_id = %resp.data.id, "twitter.tweet.created");
        Ok(resp.data)
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
