mod common;

use common::{error_code, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_register_and_authenticate() {
    let app = TestApp::new().await;

    let id = app.register("Seller@Example.com", "secret123").await;
    let token = app.login("seller@example.com", "secret123").await;

    let me = app.gql("{ me { id email firstName } }", json!({}), Some(&token)).await;
    assert_eq!(me["data"]["me"]["id"], id.as_str());
    assert_eq!(me["data"]["me"]["email"], "seller@example.com");

    let decoded = app.gql(
        "query($token: String!) { getUser(token: $token) { id email } }",
        json!({ "token": token }),
        None,
    ).await;
    assert_eq!(decoded["data"]["getUser"]["id"], id.as_str());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = TestApp::new().await;
    app.register("dup@example.com", "secret123").await;

    let body = app.gql(
        "mutation($input: UserInput!) { newUser(input: $input) { id } }",
        json!({ "input": {
            "firstName": "Other",
            "lastName": "Person",
            "email": "DUP@example.com",
            "password": "another1",
        }}),
        None,
    ).await;
    assert_eq!(error_code(&body), Some("CONFLICT"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'dup@example.com'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_wrong_password_yields_no_token() {
    let app = TestApp::new().await;
    app.register("auth@example.com", "secret123").await;

    let query = "mutation($input: AuthenticateInput!) { authenticateUser(input: $input) { token } }";

    let wrong = app.gql(query, json!({ "input": { "email": "auth@example.com", "password": "nope-nope" } }), None).await;
    assert_eq!(error_code(&wrong), Some("AUTH_INVALID"));
    assert!(wrong["data"].is_null());

    let unknown = app.gql(query, json!({ "input": { "email": "ghost@example.com", "password": "secret123" } }), None).await;
    assert_eq!(error_code(&unknown), Some("AUTH_INVALID"));
    assert_eq!(wrong["errors"][0]["message"], unknown["errors"][0]["message"]);
}

#[tokio::test]
async fn test_password_hash_is_not_exposed() {
    let app = TestApp::new().await;
    let body = app.gql(
        "mutation($input: UserInput!) { newUser(input: $input) { id passwordHash } }",
        json!({ "input": {
            "firstName": "A",
            "lastName": "B",
            "email": "hash@example.com",
            "password": "secret123",
        }}),
        None,
    ).await;
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    let app = TestApp::new().await;

    let body = app.gql("{ me { id } }", json!({}), Some("not-a-jwt")).await;
    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));

    let decoded = app.gql(
        "query($token: String!) { getUser(token: $token) { id } }",
        json!({ "token": "not-a-jwt" }),
        None,
    ).await;
    assert_eq!(error_code(&decoded), Some("AUTH_INVALID"));
}
