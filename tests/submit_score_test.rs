use httpmock::prelude::*;
use reqwest::Client;
use serde_json::json;

mod common;
use common::utils::{spawn_app, API_KEY};

const USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

#[tokio::test]
async fn submit_score_normalises_and_upserts() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let airtable_response = json!({
        "records": [{
            "id": "recAlice",
            "createdTime": "2024-05-01T12:00:00.000Z",
            "fields": { "Username": "Alice", "Score": 42, "User ID": USER_ID }
        }],
        "createdRecords": ["recAlice"],
        "updatedRecords": []
    });

    let upsert = test_app.store.mock_async(|when, then| {
        when.method(PATCH)
            .path(test_app.table_path())
            .header("authorization", format!("Bearer {}", API_KEY))
            .json_body(json!({
                "performUpsert": { "fieldsToMergeOn": ["User ID"] },
                "records": [{
                    "fields": { "Username": "Alice", "Score": 42, "User ID": USER_ID }
                }]
            }));
        then.status(200).json_body(airtable_response.clone());
    }).await;

    let response = client
        .post(&format!("{}/", &test_app.address))
        .json(&json!({
            "user_id": USER_ID,
            "score": 42.7,
            "username": "  Alice  "
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json().await.expect("Cannot turn into a json.");
    assert_eq!(body, airtable_response);

    upsert.assert_async().await;
}

#[tokio::test]
async fn mixed_case_user_id_is_lowercased() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let upsert = test_app.store.mock_async(|when, then| {
        when.method(PATCH)
            .path(test_app.table_path())
            .json_body(json!({
                "performUpsert": { "fieldsToMergeOn": ["User ID"] },
                "records": [{
                    "fields": { "Username": "Bob", "Score": 0, "User ID": USER_ID }
                }]
            }));
        then.status(200).json_body(json!({ "records": [] }));
    }).await;

    let response = client
        .post(&format!("{}/", &test_app.address))
        .json(&json!({
            "user_id": "550E8400-E29B-41D4-A716-446655440000",
            "score": 0,
            "username": "Bob"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    upsert.assert_async().await;
}

#[tokio::test]
async fn submit_score_returns_400_for_invalid_data() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let upsert = test_app.store.mock_async(|when, then| {
        when.method(PATCH);
        then.status(200).json_body(json!({ "records": [] }));
    }).await;

    let test_cases = vec![
        (json!({ "score": 1, "username": "a" }), "Missing 'user_id' field"),
        (json!({ "user_id": USER_ID, "username": "a" }), "Missing 'score' field"),
        (json!({ "user_id": USER_ID, "score": 1 }), "Missing 'username' field"),
        (json!({ "user_id": 12, "score": 1, "username": "a" }), "User ID is not a string"),
        (json!({ "user_id": "not-a-uuid", "score": 1, "username": "a" }), "User ID is not a valid UUID"),
        (json!({ "user_id": USER_ID, "score": "1", "username": "a" }), "Score is not a number"),
        (json!({ "user_id": USER_ID, "score": -1, "username": "a" }), "Score is negative"),
        (json!({ "user_id": USER_ID, "score": 1, "username": 5 }), "Username is not a string"),
        (json!({ "user_id": USER_ID, "score": 1, "username": "" }), "Username is empty"),
        (json!([USER_ID, 1, "a"]), "JSON data is not an object"),
        (json!(null), "JSON data is not an object"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = client
            .post(&format!("{}/", &test_app.address))
            .json(&invalid_body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            invalid_body
        );
        let body: serde_json::Value = response.json().await.expect("Cannot turn into a json.");
        assert_eq!(body, json!({ "error": error_message }));
    }

    upsert.assert_calls_async(0).await;
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(&format!("{}/", &test_app.address))
        .header("content-type", "application/json")
        .body("{\"user_id\": ")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Cannot turn into a json.");
    assert_eq!(body, json!({ "error": "Request body is not valid JSON" }));
}

#[tokio::test]
async fn upstream_failure_is_a_generic_500() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let upsert = test_app.store.mock_async(|when, then| {
        when.method(PATCH).path(test_app.table_path());
        then.status(422).json_body(json!({
            "error": { "type": "INVALID_VALUE_FOR_COLUMN", "message": "Field \"Score\" cannot accept the provided value" }
        }));
    }).await;

    let response = client
        .post(&format!("{}/", &test_app.address))
        .json(&json!({ "user_id": USER_ID, "score": 3, "username": "Carol" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body: serde_json::Value = response.json().await.expect("Cannot turn into a json.");
    assert_eq!(body, json!({ "error": "Failed to save score" }));

    upsert.assert_async().await;
}
