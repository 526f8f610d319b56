//! Minimal wrapper around the WordPress.com posts listing.
//!
//! Shapes the query string and delegates transport, logging and error mapping
//! to the shared HTTP client. The endpoint is public, so no auth is sent.
use crate::types::{PostListing, PostQuery};
use bakecast_http::{HttpClient, HttpError, RequestOpts};
use std::borrow::Cow;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://public-api.wordpress.com/rest/v1.1/";

#[derive(Clone)]
pub struct WordPressApi {
    http: HttpClient,
}

impl WordPressApi {
    /// Client for the public WordPress.com REST API.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Client for a self-hosted Jetpack proxy or a test server. A trailing
    /// slash is added when missing so relative paths keep the version prefix.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, HttpError> {
        let base = if endpoint.ends_with('/') {
            Cow::Borrowed(endpoint)
        } else {
            Cow::Owned(format!("{endpoint}/"))
        };
        Ok(Self {
            http: HttpClient::new(&base)?,
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.http = self.http.with_timeout(dur);
        self
    }

    /// Borrow the underlying client, e.g. to download media from the same host.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch the first page of posts matching `query`.
    pub async fn fetch_posts(&self, query: &PostQuery) -> Result<PostListing, HttpError> {
        let number = query.number.clamp(1, PostQuery::MAX_NUMBER);
        let path = format!("sites/{}/posts/", query.site.trim_matches('/'));

        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("type", Cow::Borrowed(query.post_type.as_str())),
            ("number", number.to_string().into()),
            ("order", Cow::Borrowed(query.order.as_str())),
        ];

        let listing: PostListing = self
            .http
            .get_json(
                &path,
                RequestOpts {
                    query: Some(params),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(
            site = %query.site,
            found = listing.found,
            returned = listing.posts.len(),
            "wordpress.posts.fetched"
        );
        Ok(listing)
    }
}
