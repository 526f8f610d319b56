use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result of a `sites/$site/posts` query.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostListing {
    /// Total number of matching posts, not the length of `posts`.
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "ID", default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    // WordPress sends `{}` for posts without media; some proxies send `[]`.
    #[serde(default, deserialize_with = "attachments_map_or_empty")]
    pub attachments: BTreeMap<String, Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

fn attachments_map_or_empty<'de, D>(d: D) -> Result<BTreeMap<String, Attachment>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Map(BTreeMap<String, Attachment>),
        List(Vec<Attachment>),
    }
    Ok(match Option::<Raw>::deserialize(d)? {
        Some(Raw::Map(m)) => m,
        Some(Raw::List(list)) => list
            .into_iter()
            .enumerate()
            .map(|(i, a)| (i.to_string(), a))
            .collect(),
        None => BTreeMap::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Desc => "DESC",
            SortOrder::Asc => "ASC",
        }
    }

    /// Parse `ASC`/`DESC` case-insensitively; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DESC" => Some(SortOrder::Desc),
            "ASC" => Some(SortOrder::Asc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub site: String,
    pub post_type: String,
    /// Page size; WordPress.com caps it at 100.
    pub number: u32,
    pub order: SortOrder,
}

impl PostQuery {
    pub const MAX_NUMBER: u32 = 100;

    /// Recipes, newest first, one full page.
    pub fn recipes(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            post_type: "recipe".into(),
            number: Self::MAX_NUMBER,
            order: SortOrder::Desc,
        }
    }
}
