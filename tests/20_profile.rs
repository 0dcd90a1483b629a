mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{TestServer, TestUser};

async fn create_profile(server: &TestServer, who: &TestUser, handle: &str) -> Result<Value> {
    let (status, body) = server
        .post_as(
            who,
            "/profile",
            json!({
                "handle": handle,
                "status": "Developer",
                "skills": "rust, sql,, axum ",
                "website": "https://example.com",
                "twitter": "https://twitter.com/someone"
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK, "profile creation failed: {body}");
    Ok(body)
}

#[tokio::test]
async fn upsert_creates_then_updates() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let created = create_profile(&server, &alice, "alice").await?;
    assert_eq!(created["handle"], "alice");
    assert_eq!(created["user"], alice.user.id.to_string());
    assert_eq!(created["skills"], json!(["rust", "sql", "axum"]));
    assert_eq!(created["social"]["twitter"], "https://twitter.com/someone");

    let (status, updated) = server
        .post_as(
            &alice,
            "/profile",
            json!({ "handle": "alice", "status": "Lead", "skills": "go", "youtube": "https://youtube.com/a" }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], created["_id"]);
    assert_eq!(updated["status"], "Lead");
    assert_eq!(updated["skills"], json!(["go"]));
    // Social links merge rather than replace
    assert_eq!(updated["social"]["twitter"], "https://twitter.com/someone");
    assert_eq!(updated["social"]["youtube"], "https://youtube.com/a");
    Ok(())
}

#[tokio::test]
async fn upsert_reports_every_invalid_field() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server
        .post_as(&alice, "/profile", json!({ "handle": "a", "website": "not a url" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["handle"], "Handle needs to be between 2 and 40 characters");
    assert_eq!(body["status"], "Status field is required");
    assert_eq!(body["skills"], "Skills field is required");
    assert_eq!(body["website"], "Not a valid URL");
    Ok(())
}

#[tokio::test]
async fn handles_are_unique_across_users() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    let bob = server.seed_user("Bob").await?;
    create_profile(&server, &alice, "taken").await?;

    let (status, body) = server
        .post_as(&bob, "/profile", json!({ "handle": "taken", "status": "Dev", "skills": "c" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["handle"], "That handle already exists");
    Ok(())
}

#[tokio::test]
async fn reads_populate_the_owner() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server.get_as(&alice, "/profile").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["noprofile"], "There is no profile for this user");

    create_profile(&server, &alice, "alice").await?;

    let (status, own) = server.get_as(&alice, "/profile").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own["user"]["_id"], alice.user.id.to_string());
    assert_eq!(own["user"]["name"], "Alice");

    let (status, by_handle) = server.get("/profile/handle/alice").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_handle["_id"], own["_id"]);

    let (status, by_user) = server.get(&format!("/profile/user/{}", alice.user.id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_user["handle"], "alice");

    let (status, all) = server.get("/profile/all").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn missing_profiles_are_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;

    let (status, body) = server.get("/profile/all").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("noprofile").is_some());

    let (status, _) = server.get("/profile/handle/nobody").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.get("/profile/user/not-a-uuid").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn experience_entries_prepend_and_remove() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    create_profile(&server, &alice, "alice").await?;

    for title in ["Junior", "Senior"] {
        let (status, _) = server
            .post_as(
                &alice,
                "/profile/experience",
                json!({ "title": title, "company": "Acme", "from": "2019-01-01" }),
            )
            .await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, profile) = server.get_as(&alice, "/profile").await?;
    let experience = profile["experience"].as_array().cloned().unwrap_or_default();
    assert_eq!(experience.len(), 2);
    assert_eq!(experience[0]["title"], "Senior");
    let junior_id = experience[1]["_id"].as_str().unwrap_or_default().to_string();

    let (status, after) = server
        .delete_as(&alice, &format!("/profile/experience/{}", junior_id))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["experience"].as_array().map(Vec::len), Some(1));
    assert_eq!(after["experience"][0]["title"], "Senior");

    // Already gone: a bad request, and nothing else is touched
    let (status, _) = server
        .delete_as(&alice, &format!("/profile/experience/{}", junior_id))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, profile) = server.get_as(&alice, "/profile").await?;
    assert_eq!(profile["experience"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn education_requires_its_fields() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    create_profile(&server, &alice, "alice").await?;

    let (status, body) = server
        .post_as(&alice, "/profile/education", json!({ "school": "MIT" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("degree").is_some());
    assert!(body.get("fieldofstudy").is_some());
    assert!(body.get("from").is_some());

    let (status, body) = server
        .post_as(
            &alice,
            "/profile/education",
            json!({ "school": "MIT", "degree": "BSc", "fieldofstudy": "CS", "from": "2012-09-01", "current": true }),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    let id = body["education"][0]["_id"].as_str().unwrap_or_default().to_string();

    let (status, body) = server.delete_as(&alice, &format!("/profile/education/{}", id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["education"], json!([]));
    Ok(())
}

#[tokio::test]
async fn experience_without_profile_is_a_bad_request() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server
        .delete_as(&alice, &format!("/profile/experience/{}", uuid::Uuid::new_v4()))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("noprofile").is_some());
    Ok(())
}

#[tokio::test]
async fn deleting_the_account_removes_profile_and_user() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;
    create_profile(&server, &alice, "alice").await?;

    let (status, body) = server.delete_as(&alice, "/profile").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = server.get("/profile/handle/alice").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn handle_and_skills_are_trimmed() -> Result<()> {
    let server = TestServer::spawn().await?;
    let alice = server.seed_user("Alice").await?;

    let (status, body) = server
        .post_as(&alice, "/profile", json!({ "handle": "  alice ", "status": "Dev", "skills": " , ," }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["skills"], "Skills field is required");

    let (status, body) = server
        .post_as(&alice, "/profile", json!({ "handle": "  alice ", "status": " Dev ", "skills": "rust" }))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["handle"], "alice");
    assert_eq!(body["status"], "Dev");

    let (status, _) = server.get("/profile/handle/alice").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
