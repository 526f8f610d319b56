use bakecast_social::twitter::{TwitterApi, TwitterCredentials};
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_json, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn creds() -> TwitterCredentials {
    TwitterCredentials {
        consumer_key: "ck".into(),
        consumer_secret: "cs".into(),
        access_token: "at".into(),
        access_token_secret: "ats".into(),
    }
}

fn api_for(server: &MockServer) -> TwitterApi {
    let base = format!("{}/", server.uri());
    TwitterApi::with_base_urls(creds(), &base, &base).expect("api")
}

const OAUTH_HEADER: &str = r#"^OAuth .*oauth_consumer_key="ck".*oauth_signature=".+".*oauth_token="at""#;

#[tokio::test]
async fn upload_then_tweet_with_media() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .and(header_regex("authorization", OAUTH_HEADER))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "media_id": 555,
            "media_id_string": "555",
            "size": 4
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header_regex("authorization", OAUTH_HEADER))
        .and(body_json(json!({
            "text": "Rye https://bakingbrew.com/rye/",
            "media": { "media_ids": ["555"] }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "1800", "text": "Rye https://t.co/abc" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);

    let mut file = tempfile::Builder::new()
        .prefix("bakecast-test-")
        .suffix(".jpg")
        .tempfile()
        .unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

    let media = api.upload_media_file(file.path()).await.expect("upload");
    assert_eq!(media.media_id_string, "555");

    let tweet = api
        .create_tweet("Rye https://bakingbrew.com/rye/", &[media.media_id_string])
        .await
        .expect("tweet");
    assert_eq!(tweet.id, "1800");
}

#[tokio::test]
async fn verify_credentials_returns_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .and(header_regex("authorization", OAUTH_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "42", "username": "bakingbrew", "name": "Baking Brew" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = api_for(&server).verify_credentials().await.expect("user");
    assert_eq!(user.username, "bakingbrew");
}

#[tokio::test]
async fn duplicate_status_is_fatal_with_platform_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "title": "Forbidden",
            "detail": "You are not allowed to create a Tweet with duplicate content.",
            "status": 403
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_tweet("same again", &[])
        .await
        .unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("create tweet"), "{chain}");
    assert!(chain.contains("duplicate content"), "{chain}");
}

#[tokio::test]
async fn bad_credentials_surface_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{ "code": 32, "message": "Could not authenticate you." }]
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .upload_media(vec![1, 2, 3], "x.jpg", "image/jpeg")
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Could not authenticate you."));
}
