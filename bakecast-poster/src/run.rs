//! One pass: fetch, select, locate, download, publish.

use crate::compose::{OutboundPost, compose_status};
use crate::download::download_image;
use crate::error::{PosterError, Result};
use crate::image::{DEFAULT_IMAGE_MARKER, locate_image};
use crate::publish::{MediaId, Publisher};
use crate::select::{IndexPicker, RandomPicker, select_post};
use crate::source::ContentSource;
use bakecast_wordpress::PostQuery;

/// What a run chose and, unless dry, what it published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub index: usize,
    pub title: String,
    pub url: String,
    pub image_url: String,
    pub status_text: String,
    pub account: Option<String>,
    pub media_id: Option<MediaId>,
    pub status_id: Option<String>,
}

pub struct Poster<S, P> {
    source: S,
    publisher: P,
    query: PostQuery,
    picker: Box<dyn IndexPicker>,
    image_marker: String,
    dry_run: bool,
}

impl<S, P> Poster<S, P>
where
    S: ContentSource,
    P: Publisher,
{
    pub fn new(source: S, publisher: P, query: PostQuery) -> Self {
        Self {
            source,
            publisher,
            query,
            picker: Box::new(RandomPicker::new()),
            image_marker: DEFAULT_IMAGE_MARKER.to_string(),
            dry_run: false,
        }
    }

    pub fn with_picker(mut self, picker: impl IndexPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn with_image_marker(mut self, marker: impl Into<String>) -> Self {
        self.image_marker = marker.into();
        self
    }

    /// Stop after the download; nothing is sent to the publisher.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        let listing = self.source.fetch_listing(&self.query).await?;
        tracing::info!(
            site = %self.query.site,
            found = listing.found,
            returned = listing.posts.len(),
            "listing fetched"
        );

        let (index, post) = select_post(&listing, self.picker.as_mut())?;
        tracing::info!(index, title = %post.title, url = %post.url, "post chosen");

        let image_url = locate_image(post, &self.image_marker)?.to_string();
        let status_text = compose_status(&post.title, &post.url);

        let mut report = RunReport {
            index,
            title: post.title.clone(),
            url: post.url.clone(),
            image_url,
            status_text,
            account: None,
            media_id: None,
            status_id: None,
        };

        // Removed from disk when `image` drops, on every path out of here.
        let image = download_image(&self.source, &report.image_url).await?;
        tracing::info!(image = %report.image_url, bytes = image.len(), "image downloaded");

        if self.dry_run {
            tracing::info!(status = %report.status_text, "dry run, not publishing");
            return Ok(report);
        }

        let account = self
            .publisher
            .authenticate()
            .await
            .map_err(PosterError::Publish)?;
        tracing::info!(account = %account, "authenticated");

        let media_id = self
            .publisher
            .upload_image(image.path())
            .await
            .map_err(PosterError::Publish)?;
        drop(image);

        let outbound = OutboundPost {
            text: report.status_text.clone(),
            media_ids: vec![media_id.clone()],
        };
        let published = self
            .publisher
            .publish(&outbound)
            .await
            .map_err(PosterError::Publish)?;
        tracing::info!(status_id = %published.id, media_id = %media_id, "status published");

        report.account = Some(account);
        report.media_id = Some(media_id);
        report.status_id = Some(published.id);
        Ok(report)
    }
}
