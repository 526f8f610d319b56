use serde::{Deserialize, Serialize};

/// `POST 1.1/media/upload.json` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUpload {
    #[serde(default)]
    pub media_id: Option<u64>,
    pub media_id_string: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub expires_after_secs: Option<u64>,
    #[serde(default)]
    pub image: Option<ImageInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
}

/// `POST 2/tweets` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTweet {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<TweetMedia>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TweetMedia {
    pub media_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTweetResponse {
    pub data: CreatedTweet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTweet {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub data: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}
