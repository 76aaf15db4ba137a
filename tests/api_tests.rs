//! API integration tests
//!
//! These run against a live server (`cargo run`) with a provisioned
//! `admin`/`admin` account whose profile role is Admin.
//! Run with: cargo test -- --ignored

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080";

/// Client that surfaces redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Register a fresh member account and return (token, username, user id)
async fn register_member(client: &Client, prefix: &str) -> (String, String, i64) {
    let username = unique_username(prefix);
    let response = client
        .post(format!("{}/register/", BASE_URL))
        .json(&json!({ "username": username.clone(), "password": "password" }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("No token").to_string();
    let id = body["user"]["id"].as_i64().expect("No user id");
    (token, username, id)
}

/// Authenticate as the provisioned admin
async fn admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/login/", BASE_URL))
        .json(&json!({ "username": "admin", "password": "admin" }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = client();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_creates_member_profile() {
    let client = client();
    let username = unique_username("alice");

    let response = client
        .post(format!("{}/register/", BASE_URL))
        .json(&json!({ "username": username.clone(), "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], Value::String(username));
    // The implicit profile defaults to Member
    assert_eq!(body["user"]["role"], "Member");
}

#[tokio::test]
#[ignore]
async fn test_register_duplicate_username_conflicts() {
    let client = client();
    let (_, username, _) = register_member(&client, "dup").await;

    let response = client
        .post(format!("{}/register/", BASE_URL))
        .json(&json!({ "username": username, "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = client();

    let response = client
        .post(format!("{}/login/", BASE_URL))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_second_save_keeps_one_profile() {
    let client = client();
    let (token, username, _) = register_member(&client, "resave").await;

    // Save the account twice in sequence
    for _ in 0..2 {
        let response = client
            .put(format!("{}/profile/", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({}))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    // Still exactly one profile, role unchanged
    let response = client
        .get(format!("{}/me/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], Value::String(username));
    assert_eq!(body["role"], "Member");
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_dashboard_redirects_to_login() {
    let client = client();

    for path in [
        "/admin-dashboard/",
        "/librarian-dashboard/",
        "/member-dashboard/",
    ] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {}", path);
        assert_eq!(
            response.headers()["location"].to_str().unwrap(),
            "/login/",
            "path {}",
            path
        );
    }
}

#[tokio::test]
#[ignore]
async fn test_member_sees_only_member_dashboard() {
    let client = client();
    let (token, _, _) = register_member(&client, "member").await;

    let response = client
        .get(format!("{}/member-dashboard/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "Member");
    assert!(body["books"].as_array().expect("No books array").len() <= 5);

    // The other two dashboards bounce a member to login
    for path in ["/admin-dashboard/", "/librarian-dashboard/"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {}", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_promote_role_switches_dashboards() {
    let client = client();
    let admin = admin_token(&client).await;
    let (_, username, user_id) = register_member(&client, "promoted").await;

    let response = client
        .put(format!("{}/users/{}/role/", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "role": "Admin" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "Admin");

    // A fresh session carries the new role
    let response = client
        .post(format!("{}/login/", BASE_URL))
        .json(&json!({ "username": username.clone(), "password": "password" }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("No token");

    let response = client
        .get(format!("{}/admin-dashboard/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "Admin");
    assert!(body["totals"]["books"].is_number());

    // The member dashboard now bounces this account
    let response = client
        .get(format!("{}/member-dashboard/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"].to_str().unwrap(), "/login/");
}

#[tokio::test]
#[ignore]
async fn test_member_cannot_add_books() {
    let client = client();
    let (token, _, _) = register_member(&client, "nowrite").await;

    let response = client
        .post(format!("{}/books/add/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Orlando", "author": "Virginia Woolf" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"].to_str().unwrap(), "/login/");
}

#[tokio::test]
#[ignore]
async fn test_create_book_without_title_rejected() {
    let client = client();
    let admin = admin_token(&client).await;

    let before: Value = client
        .get(format!("{}/list/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let count_before = before["books"].as_array().expect("No books array").len();

    let response = client
        .post(format!("{}/books/add/", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "title": "", "author": "Virginia Woolf" }))
        .send()
        .await
        .expect("Failed to send request");

    // The form comes back with the message and the submitted values
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Title is required");
    assert_eq!(body["values"]["author"], "Virginia Woolf");

    // Nothing was persisted
    let after: Value = client
        .get(format!("{}/list/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(
        after["books"].as_array().expect("No books array").len(),
        count_before
    );
}

#[tokio::test]
#[ignore]
async fn test_book_crud_flow() {
    let client = client();
    let admin = admin_token(&client).await;

    // Create
    let response = client
        .post(format!("{}/books/add/", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": "To the Lighthouse",
            "author": "Virginia Woolf",
            "publication_year": 1927
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with("/list/"));

    // Find it on the list
    let list: Value = client
        .get(format!("{}/list/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let book = list["books"]
        .as_array()
        .expect("No books array")
        .iter()
        .find(|b| b["title"] == "To the Lighthouse")
        .expect("Created book not listed")
        .clone();
    let book_id = book["id"].as_i64().expect("No book id");
    assert_eq!(book["author"], "Virginia Woolf");

    // Update
    let response = client
        .post(format!("{}/books/{}/edit/", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": "To the Lighthouse (annotated)",
            "author": "Virginia Woolf",
            "publication_year": 1927
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The first delete request only asks for confirmation
    let response = client
        .get(format!("{}/books/{}/delete/", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["id"].as_i64(), Some(book_id));

    // The record is still there
    let response = client
        .get(format!("{}/books/{}/", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // The confirmed second request removes it
    let response = client
        .post(format!("{}/books/{}/delete/", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = client
        .get(format!("{}/books/{}/", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_logout_revokes_the_session() {
    let client = client();
    let (token, _, _) = register_member(&client, "logout").await;

    let response = client
        .post(format!("{}/logout/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The token no longer authenticates
    let response = client
        .get(format!("{}/me/", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
