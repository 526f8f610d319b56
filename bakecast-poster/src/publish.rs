//! Where the finished status goes.

use crate::compose::OutboundPost;
use anyhow::Result;
use async_trait::async_trait;
use bakecast_social::twitter::TwitterApi;
use std::fmt;
use std::path::Path;

/// Handle the platform returns for uploaded media.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaId(pub String);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedStatus {
    pub id: String,
    pub text: String,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Confirm the credentials work; returns the account handle.
    async fn authenticate(&self) -> Result<String>;

    async fn upload_image(&self, path: &Path) -> Result<MediaId>;

    async fn publish(&self, post: &OutboundPost) -> Result<PublishedStatus>;
}

#[async_trait]
impl Publisher for TwitterApi {
    async fn authenticate(&self) -> Result<String> {
        Ok(self.verify_credentials().await?.username)
    }

    async fn upload_image(&self, path: &Path) -> Result<MediaId> {
        let up = self.upload_media_file(path).await?;
        Ok(MediaId(up.media_id_string))
    }

    async fn publish(&self, post: &OutboundPost) -> Result<PublishedStatus> {
        let ids: Vec<String> = post.media_ids.iter().map(|m| m.0.clone()).collect();
        let created = self.create_tweet(&post.text, &ids).await?;
        Ok(PublishedStatus {
            id: created.id,
            text: created.text,
        })
    }
}
