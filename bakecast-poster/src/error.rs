use bakecast_http::HttpError;
use thiserror::Error;

/// Everything that can stop a run. Each variant is fatal; nothing is retried.
#[derive(Debug, Error)]
pub enum PosterError {
    /// The listing page came back without posts.
    #[error("listing returned no posts (found={found})")]
    EmptyListing { found: u64 },

    /// No attachment URL of the chosen post contains the image marker.
    #[error("no image found: no attachment of {title:?} contains {marker:?}")]
    NoImageFound { title: String, marker: String },

    /// More than one distinct attachment URL contains the image marker.
    #[error("{count} attachments of {title:?} contain {marker:?}; expected exactly one")]
    AmbiguousImage {
        title: String,
        marker: String,
        count: usize,
    },

    #[error("image at {url} is empty")]
    EmptyMedia { url: String },

    #[error("content source: {0}")]
    Http(#[from] HttpError),

    #[error("temporary image file: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication, upload or status publish was rejected.
    #[error("publish failed: {0:#}")]
    Publish(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PosterError>;
