//! Where posts and their images come from.

use async_trait::async_trait;
use bakecast_http::{HttpError, RequestOpts};
use bakecast_wordpress::{PostListing, PostQuery, WordPressApi};
use bytes::Bytes;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// First page of posts matching `query`.
    async fn fetch_listing(&self, query: &PostQuery) -> Result<PostListing, HttpError>;

    /// Raw bytes behind an absolute media URL.
    async fn fetch_media(&self, url: &str) -> Result<Bytes, HttpError>;
}

#[async_trait]
impl ContentSource for WordPressApi {
    async fn fetch_listing(&self, query: &PostQuery) -> Result<PostListing, HttpError> {
        self.fetch_posts(query).await
    }

    async fn fetch_media(&self, url: &str) -> Result<Bytes, HttpError> {
        self.http()
            .get_bytes(
                url,
                RequestOpts {
                    allow_absolute: true,
                    ..Default::default()
                },
            )
            .await
    }
}
