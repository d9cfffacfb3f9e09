//! Integration tests for `NoteClient` using wiremock HTTP mocks.

use notefollow_client::{ClientError, NoteClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NoteClient {
    NoteClient::new(&format!("{base_url}/"), 5, "notefollow-test/0.1")
        .expect("client construction should not fail")
}

fn creator_body(followers: i64) -> serde_json::Value {
    json!({
        "data": {
            "id": 1_234_567,
            "nickname": "はしゃも",
            "urlname": "hasyamo",
            "followerCount": followers,
            "profileImageUrl": "https://assets.st-note.com/avatar.png",
            "noteCount": 321
        }
    })
}

#[tokio::test]
async fn fetch_creator_returns_parsed_creator() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("id", "hasyamo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(creator_body(1_212)))
        .mount(&server)
        .await;

    let creator = test_client(&server.uri())
        .fetch_creator("hasyamo")
        .await
        .expect("should parse creator");

    assert_eq!(creator.id, "1234567");
    assert_eq!(creator.nickname, "はしゃも");
    assert_eq!(creator.urlname, "hasyamo");
    assert_eq!(creator.follower_count, 1_212);
    assert_eq!(
        creator.profile_image_url.as_deref(),
        Some("https://assets.st-note.com/avatar.png")
    );
}

#[tokio::test]
async fn fetch_creator_treats_empty_image_url_as_absent() {
    let server = MockServer::start().await;
    let mut body = creator_body(3);
    body["data"]["profileImageUrl"] = json!("");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let creator = test_client(&server.uri()).fetch_creator("x").await.unwrap();
    assert!(creator.profile_image_url.is_none());
}

#[tokio::test]
async fn fetch_creator_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_creator("nobody")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::NotFound { ref creator_id } if creator_id == "nobody"),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_creator_maps_missing_data_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_creator("ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_creator_maps_server_error_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_creator("hasyamo")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::ApiError { status: 503, .. }),
        "expected ApiError(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_creator_rejects_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_creator("hasyamo")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn fetch_creator_reports_unreachable_endpoint() {
    // Nothing listens on port 1.
    let err = test_client("http://127.0.0.1:1")
        .fetch_creator("hasyamo")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unreachable(_)), "got: {err:?}");
}
