use bakecast_http::HttpError;
use bakecast_wordpress::{PostQuery, SortOrder, WordPressApi};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetches_recipe_page_with_fixed_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1.1/sites/bakingbrew.com/posts/"))
        .and(query_param("type", "recipe"))
        .and(query_param("number", "100"))
        .and(query_param("order", "DESC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "found": 2,
            "posts": [
                { "ID": 1, "title": "Rye", "URL": "https://bakingbrew.com/rye/", "attachments": {} },
                { "ID": 2, "title": "Spelt", "URL": "https://bakingbrew.com/spelt/",
                  "attachments": { "9": { "URL": "https://bakingbrew.com/spelt-main.jpg" } } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // no trailing slash on purpose
    let api = WordPressApi::with_endpoint(&format!("{}/rest/v1.1", server.uri())).unwrap();
    let listing = api
        .fetch_posts(&PostQuery::recipes("bakingbrew.com"))
        .await
        .expect("listing");

    assert_eq!(listing.found, 2);
    assert_eq!(listing.posts[1].title, "Spelt");
    assert_eq!(
        listing.posts[1].attachments["9"].url,
        "https://bakingbrew.com/spelt-main.jpg"
    );
}

#[tokio::test]
async fn page_size_is_capped_at_api_maximum() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sites/x.blog/posts/"))
        .and(query_param("number", "100"))
        .and(query_param("order", "ASC"))
        .and(query_param("type", "post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "found": 0, "posts": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let api = WordPressApi::with_endpoint(&format!("{}/", server.uri())).unwrap();
    let query = PostQuery {
        site: "x.blog".into(),
        post_type: "post".into(),
        number: 500,
        order: SortOrder::Asc,
    };
    let listing = api.fetch_posts(&query).await.expect("listing");
    assert_eq!(listing.found, 0);
    assert!(listing.posts.is_empty());
}

#[tokio::test]
async fn unknown_site_surfaces_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sites/nope.invalid/posts/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "unknown_blog",
            "message": "Unknown blog"
        })))
        .mount(&server)
        .await;

    let api = WordPressApi::with_endpoint(&format!("{}/", server.uri())).unwrap();
    let err = api
        .fetch_posts(&PostQuery::recipes("nope.invalid"))
        .await
        .unwrap_err();
    match err {
        HttpError::Api { status, message, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Unknown blog");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
