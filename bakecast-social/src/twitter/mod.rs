//! Twitter/X integration: OAuth 1.0a signing, media upload, status publish.
pub mod client;
pub mod oauth;
pub mod types;

pub use client::TwitterApi;
pub use oauth::{OAuthSigner, TwitterCredentials};
