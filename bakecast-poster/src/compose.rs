use crate::publish::MediaId;

/// A status ready to publish: text plus the media it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundPost {
    pub text: String,
    pub media_ids: Vec<MediaId>,
}

/// `title + " " + url`, nothing trimmed or shortened.
pub fn compose_status(title: &str, url: &str) -> String {
    format!("{title} {url}")
}
