mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{TestServer, TestUser};

async fn create_post(server: &TestServer, who: &TestUser, text: &str) -> Result<Value> {
    let (status, body) = server.post_as(who, "/posts", json!({ "text": text })).await?;
    assert_eq!(status, StatusCode::OK, "post creation failed: {body}");
    Ok(body)
}

fn id_of(value: &Value) -> String {
    value["_id"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn create_and_read_posts() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server.get("/posts").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("noposts").is_some());

    let first = create_post(&server, &alice, "The very first post").await?;
    assert_eq!(first["user"], alice.user.id.to_string());
    assert_eq!(first["name"], "Alice");
    assert_eq!(first["avatar"], "//www.gravatar.com/avatar/alice");
    assert_eq!(first["likes"], json!([]));
    assert_eq!(first["comments"], json!([]));

    let second = create_post(&server, &alice, "A second, newer post").await?;

    let (status, list) = server.get("/posts").await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<String> = list.as_array().cloned().unwrap_or_default().iter().map(id_of).collect();
    assert_eq!(ids, vec![id_of(&second), id_of(&first)]);

    let (status, one) = server.get(&format!("/posts/{}", id_of(&first))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["text"], "The very first post");
    Ok(())
}

#[tokio::test]
async fn text_length_is_enforced() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server.post_as(&alice, "/posts", json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "text": "Text field is required" }));

    let (status, body) = server.post_as(&alice, "/posts", json!({ "text": "too short" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "text": "Text must be between 10 and 300 characters" }));

    let (status, _) = server.post_as(&alice, "/posts", json!({ "text": "x".repeat(301) })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.post_as(&alice, "/posts", json!({ "text": "x".repeat(300) })).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn unknown_posts_are_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server.get(&format!("/posts/{}", uuid::Uuid::new_v4())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["nopost"], "That post does not exist");

    let (status, _) = server.get("/posts/garbage").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn only_the_author_deletes() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    let bob = server.seed_user("Bob").await?;
    let post = create_post(&server, &alice, "Alice wrote this one").await?;
    let path = format!("/posts/{}", id_of(&post));

    let (status, body) = server.delete_as(&bob, &path).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["notauthorised"], "User not authorised");

    let (status, body) = server.delete_as(&alice, &path).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = server.delete_as(&alice, &path).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn likes_are_unique_per_user() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    let bob = server.seed_user("Bob").await?;
    let post = create_post(&server, &alice, "Something worth liking").await?;
    let id = id_of(&post);

    let (status, body) = server.post_as(&bob, &format!("/posts/unlike/{}", id), json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("notliked").is_some());

    let (status, body) = server.post_as(&bob, &format!("/posts/like/{}", id), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], json!([{ "user": bob.user.id }]));

    let (status, body) = server.post_as(&bob, &format!("/posts/like/{}", id), json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("alreadyliked").is_some());

    let (status, body) = server.post_as(&alice, &format!("/posts/like/{}", id), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"][0]["user"], alice.user.id.to_string());

    let (status, body) = server.post_as(&bob, &format!("/posts/unlike/{}", id), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], json!([{ "user": alice.user.id }]));
    Ok(())
}

#[tokio::test]
async fn like_on_missing_post_is_a_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server
        .post_as(&alice, &format!("/posts/like/{}", uuid::Uuid::new_v4()), json!({}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("nopost").is_some());
    Ok(())
}

#[tokio::test]
async fn comments_prepend_and_remove() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    let bob = server.seed_user("Bob").await?;
    let post = create_post(&server, &alice, "Comment on this please").await?;
    let id = id_of(&post);

    let (status, body) = server
        .post_as(&bob, &format!("/posts/comment/{}", id), json!({ "text": "short" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("text").is_some());

    server
        .post_as(&bob, &format!("/posts/comment/{}", id), json!({ "text": "Bob was here first" }))
        .await?;
    let (status, body) = server
        .post_as(&alice, &format!("/posts/comment/{}", id), json!({ "text": "Alice replies to Bob" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"][0]["name"], "Alice");
    assert_eq!(body["comments"][1]["name"], "Bob");
    let bob_comment = id_of(&body["comments"][1]);

    let (status, body) = server
        .delete_as(&alice, &format!("/posts/comment/{}/{}", id, bob_comment))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["comments"][0]["name"], "Alice");

    let (status, body) = server
        .delete_as(&alice, &format!("/posts/comment/{}/{}", id, bob_comment))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["nocomment"], "That comment does not exist");
    Ok(())
}

#[tokio::test]
async fn comment_on_missing_post_is_a_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server
        .post_as(
            &alice,
            &format!("/posts/comment/{}", uuid::Uuid::new_v4()),
            json!({ "text": "Nobody will read this" }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("nopost").is_some());
    Ok(())
}

#[tokio::test]
async fn empty_listing_can_be_configured_to_return_an_array() -> Result<()> {
    let mut config = devconnector_api::config::AppConfig::for_tests();
    config.api.empty_list_not_found = false;
    let server = TestServer::spawn_with(config).await?;

    let (status, body) = server.get("/posts").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}
