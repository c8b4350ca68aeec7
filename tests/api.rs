//! End-to-end tests for the posts API over real TCP.

use posts_service::config::ServiceConfig;
use posts_service::Post;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_crud_scenario() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/posts"))
        .body(r#"{"Body":"hello"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"ID":1,"Body":"hello"}"#);

    let res = client
        .post(server.url("/posts"))
        .body(r#"{"Body":"world"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.text().await.unwrap(), r#"{"ID":2,"Body":"world"}"#);

    let res = client.get(server.url("/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    let mut posts: Vec<Post> = res.json().await.unwrap();
    posts.sort_by_key(|p| p.id);
    assert_eq!(
        posts,
        vec![
            Post { id: 1, body: "hello".into() },
            Post { id: 2, body: "world".into() },
        ]
    );

    let res = client.get(server.url("/posts/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"ID":2,"Body":"world"}"#);

    let res = client.delete(server.url("/posts/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().is_empty());

    let res = client.get(server.url("/posts/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "Post not found");

    let res = client.get(server.url("/posts/99")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(server.url("/posts/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Bad post ID");

    server.stop().await;
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/posts"))
        .body(r#"{"ID":500,"Body":"mine"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let post: Post = res.json().await.unwrap();
    assert_eq!(post, Post { id: 1, body: "mine".into() });

    let res = client.get(server.url("/posts/500")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_error_statuses() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/posts"))
        .body("definitely not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Error parsing request body");

    let res = client.put(server.url("/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET, POST");

    let res = client.patch(server.url("/posts/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()["allow"], "GET, DELETE");

    let res = client.delete(server.url("/posts/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client.delete(server.url("/posts/1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(server.url("/comments")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/posts")).send().await.unwrap();
    let id = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let server = common::start_server(ServiceConfig::default()).await;
    let url = server.url("/posts");
    let client = common::client();

    assert!(client.get(&url).send().await.unwrap().status().is_success());

    server.stop().await;

    assert!(client.get(&url).send().await.is_err());
}
