//! WordPress.com / Jetpack REST client used to find recipe posts.
//!
//! Only the `sites/$site/posts` listing is wrapped. A single page is fetched;
//! `PostListing::found` reports how many posts matched in total, which can be
//! larger than the page that came back.
pub mod client;
pub mod types;

pub use client::WordPressApi;
pub use types::{Attachment, Post, PostListing, PostQuery, SortOrder};
