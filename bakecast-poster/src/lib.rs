//! The recipe-to-status pipeline.
//!
//! A [`Poster`] runs one forward pass:
//!
//! 1. fetch the first page of posts from a [`ContentSource`]
//! 2. pick one uniformly with an [`IndexPicker`]
//! 3. find its primary image ([`locate_image`])
//! 4. download it into a scoped temp file ([`download_image`])
//! 5. authenticate, upload, and publish through a [`Publisher`]
//!
//! Every failure is a [`PosterError`] and ends the run.
//!
//! ```no_run
//! use bakecast_poster::{FixedPicker, Poster};
//! use bakecast_social::twitter::{TwitterApi, TwitterCredentials};
//! use bakecast_wordpress::{PostQuery, WordPressApi};
//!
//! # async fn demo(creds: TwitterCredentials) -> anyhow::Result<()> {
//! let mut poster = Poster::new(
//!     WordPressApi::new()?,
//!     TwitterApi::new(creds)?,
//!     PostQuery::recipes("bakingbrew.com"),
//! )
//! .with_picker(FixedPicker(0));
//! let report = poster.run().await?;
//! println!("{}", report.status_text);
//! # Ok(()) }
//! ```
pub mod compose;
pub mod download;
pub mod error;
pub mod image;
pub mod publish;
pub mod run;
pub mod select;
pub mod source;

pub use compose::{compose_status, OutboundPost};
pub use download::{download_image, DownloadedImage};
pub use error::{PosterError, Result};
pub use image::{locate_image, DEFAULT_IMAGE_MARKER};
pub use publish::{MediaId, PublishedStatus, Publisher};
pub use run::{Poster, RunReport};
pub use select::{select_post, FixedPicker, IndexPicker, RandomPicker};
pub use source::ContentSource;
