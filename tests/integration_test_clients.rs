mod common;

use common::{error_code, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_client_requires_authentication() {
    let app = TestApp::new().await;

    let body = app.gql(
        "mutation($input: ClientInput!) { newClient(input: $input) { id } }",
        json!({ "input": { "firstName": "A", "lastName": "B", "company": "C", "email": "a@b.c" } }),
        None,
    ).await;
    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));

    let body = app.gql("{ getSellerClients { id } }", json!({}), None).await;
    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
}

#[tokio::test]
async fn test_client_is_stamped_with_seller() {
    let app = TestApp::new().await;
    let (seller_id, token) = app.seller("owner@example.com").await;
    let client_id = app.create_client(&token, "buyer@acme.com").await;

    let body = app.gql(
        "query($id: ID!) { getClient(id: $id) { id sellerId seller { id email } } }",
        json!({ "id": client_id }),
        Some(&token),
    ).await;
    assert_eq!(body["data"]["getClient"]["sellerId"], seller_id.as_str());
    assert_eq!(body["data"]["getClient"]["seller"]["email"], "owner@example.com");

    let mine = app.gql("{ getSellerClients { id } }", json!({}), Some(&token)).await;
    assert_eq!(mine["data"]["getSellerClients"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_client_email_is_conflict() {
    let app = TestApp::new().await;
    let (_, token) = app.seller("owner@example.com").await;
    app.create_client(&token, "buyer@acme.com").await;

    let body = app.gql(
        "mutation($input: ClientInput!) { newClient(input: $input) { id } }",
        json!({ "input": { "firstName": "Z", "lastName": "Y", "company": "X", "email": "Buyer@Acme.com" } }),
        Some(&token),
    ).await;
    assert_eq!(error_code(&body), Some("CONFLICT"));
}

#[tokio::test]
async fn test_only_owner_can_touch_client() {
    let app = TestApp::new().await;
    let (_, owner) = app.seller("owner@example.com").await;
    let (_, intruder) = app.seller("intruder@example.com").await;
    let client_id = app.create_client(&owner, "buyer@acme.com").await;

    let read = app.gql(
        "query($id: ID!) { getClient(id: $id) { id } }",
        json!({ "id": client_id }),
        Some(&intruder),
    ).await;
    assert_eq!(error_code(&read), Some("FORBIDDEN"));

    let update = app.gql(
        "mutation($id: ID!, $input: ClientUpdateInput!) { updateClient(id: $id, input: $input) { id } }",
        json!({ "id": client_id, "input": { "company": "Hijacked" } }),
        Some(&intruder),
    ).await;
    assert_eq!(error_code(&update), Some("FORBIDDEN"));

    let delete = app.gql(
        "mutation($id: ID!) { deleteClient(id: $id) }",
        json!({ "id": client_id }),
        Some(&intruder),
    ).await;
    assert_eq!(error_code(&delete), Some("FORBIDDEN"));

    let owned = app.gql(
        "mutation($id: ID!, $input: ClientUpdateInput!) { updateClient(id: $id, input: $input) { company } }",
        json!({ "id": client_id, "input": { "company": "Acme Two" } }),
        Some(&owner),
    ).await;
    assert_eq!(owned["data"]["updateClient"]["company"], "Acme Two");

    let deleted = app.gql(
        "mutation($id: ID!) { deleteClient(id: $id) }",
        json!({ "id": client_id }),
        Some(&owner),
    ).await;
    assert_eq!(deleted["data"]["deleteClient"], "Client deleted");

    let gone = app.gql(
        "query($id: ID!) { getClient(id: $id) { id } }",
        json!({ "id": client_id }),
        Some(&owner),
    ).await;
    assert_eq!(error_code(&gone), Some("NOT_FOUND"));
}
