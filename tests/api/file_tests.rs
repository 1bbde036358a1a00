//! File API Tests

use std::collections::HashSet;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{b64, TestApp};

fn id_of(entry: &Value) -> String {
    entry["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = TestApp::new();

    // Register and sign in
    let response = app
        .post_json(
            "/users",
            json!({ "email": "a@x.com", "password": "pw1" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let user_id = response.json()["id"].clone();

    let response = app.connect("a@x.com", "pw1").await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.json()["token"].as_str().unwrap().to_string();

    // Folder at the root
    let docs = app
        .upload(&token, json!({ "name": "docs", "type": "folder" }))
        .await;
    assert_eq!(
        docs,
        json!({
            "id": docs["id"].clone(),
            "userId": user_id.clone(),
            "name": "docs",
            "type": "folder",
            "isPublic": false,
            "parentId": 0,
        })
    );
    let folder_id = id_of(&docs);

    // File inside it
    let payload = b"Hello Webstack!\n";
    let note = app
        .upload(
            &token,
            json!({
                "name": "note.txt",
                "type": "file",
                "parentId": folder_id,
                "data": b64(payload),
            }),
        )
        .await;
    assert!(note.get("localPath").is_none());
    assert_eq!(note["parentId"], folder_id.as_str());
    assert_eq!(note["userId"], user_id);
    let note_id = id_of(&note);
    let data_uri = format!("/files/{}/data", note_id);

    // Owner reads the bytes back
    let response = app.get(&data_uri, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), payload);
    assert_eq!(response.content_type(), Some("text/plain"));

    // Anonymous cannot
    let response = app.get(&data_uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({ "error": "Not found", "code": 404 }));

    // Publish, then anonymous can
    let response = app
        .put(&format!("/files/{}/publish", note_id), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let published = response.json();
    assert_eq!(published["isPublic"], true);
    assert_eq!(published["userId"], user_id);

    let response = app.get(&data_uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), payload);
}

#[tokio::test]
async fn test_upload_requires_a_session() {
    let app = TestApp::new();

    let response = app
        .post_json("/files", json!({ "name": "docs", "type": "folder" }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_validation_messages() {
    let app = TestApp::new();
    let (_, token) = app.signed_in_user().await;
    let file = app
        .upload(
            &token,
            json!({ "name": "a.txt", "type": "file", "data": b64(b"a") }),
        )
        .await;

    let cases = [
        (json!({ "type": "folder" }), "Missing name"),
        (json!({ "name": "x" }), "Missing type"),
        (json!({ "name": "x", "type": "video" }), "Missing type"),
        (json!({ "name": "x", "type": "image" }), "Missing data"),
        (json!({ "name": "x", "type": "file", "data": "%%%" }), "Invalid data"),
        (
            json!({ "name": "x", "type": "folder", "parentId": "00000000-0000-0000-0000-000000000001" }),
            "Parent not found",
        ),
        (
            json!({ "name": "x", "type": "folder", "parentId": file["id"].clone() }),
            "Parent is not a folder",
        ),
    ];

    for (body, expected) in cases {
        let response = app.post_json("/files", body, Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": expected, "code": 400 }));
    }

    // Only the first upload made it
    assert_eq!(app.get("/stats", None).await.json()["files"], 1);
}

#[tokio::test]
async fn test_private_entries_are_not_found_for_others() {
    let app = TestApp::new();
    let (_, owner) = app.signed_in_user().await;
    let (_, other) = app.signed_in_user().await;
    let folder = app
        .upload(&owner, json!({ "name": "secret", "type": "folder" }))
        .await;
    let uri = format!("/files/{}", id_of(&folder));

    assert_eq!(app.get(&uri, Some(&owner)).await.json(), folder);
    assert_eq!(app.get(&uri, Some(&other)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&uri, None).await.status, StatusCode::NOT_FOUND);

    // Same answer as a missing or malformed id
    assert_eq!(
        app.get("/files/not-an-id", Some(&owner)).await.status,
        StatusCode::NOT_FOUND
    );

    // Other spellings of the same UUID are not aliases
    let id = id_of(&folder);
    for alias in [id.replace('-', ""), id.to_uppercase(), format!("urn:uuid:{}", id)] {
        let response = app.get(&format!("/files/{}", alias), Some(&owner)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", alias);
    }

    // Only the owner may toggle visibility
    let response = app
        .put(&format!("/files/{}/publish", id_of(&folder)), &other)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_metadata_is_visible_to_anyone() {
    let app = TestApp::new();
    let (_, owner) = app.signed_in_user().await;
    let image = app
        .upload(
            &owner,
            json!({ "name": "cat.png", "type": "image", "isPublic": true, "data": b64(b"\x89PNG") }),
        )
        .await;
    let id = id_of(&image);

    let response = app.get(&format!("/files/{}", id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["isPublic"], true);

    let response = app.get(&format!("/files/{}/data", id), None).await;
    assert_eq!(response.content_type(), Some("image/png"));

    // Unpublish hides it again
    app.put(&format!("/files/{}/unpublish", id), &owner).await;
    assert_eq!(
        app.get(&format!("/files/{}", id), None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_folder_content_is_a_bad_request_for_its_owner_only() {
    let app = TestApp::new();
    let (_, owner) = app.signed_in_user().await;
    let (_, other) = app.signed_in_user().await;
    let folder = app
        .upload(&owner, json!({ "name": "docs", "type": "folder" }))
        .await;
    let uri = format!("/files/{}/data", id_of(&folder));

    let response = app.get(&uri, Some(&owner)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "A folder doesn't have content");

    assert_eq!(app.get(&uri, Some(&other)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_size_variants() {
    let app = TestApp::new();
    let (_, owner) = app.signed_in_user().await;
    let image = app
        .upload(
            &owner,
            json!({ "name": "photo.jpg", "type": "image", "data": b64(b"original") }),
        )
        .await;
    let id = id_of(&image);

    // Variants are rendered out of band next to the original blob
    let blob = std::fs::read_dir(app.blobs.path().join("files"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    std::fs::write(format!("{}_250", blob.display()), b"small").unwrap();

    let response = app
        .get(&format!("/files/{}/data?size=250", id), Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_ref(), b"small");
    assert_eq!(response.content_type(), Some("image/jpeg"));

    for size in ["500", "..%2F..%2Fetc"] {
        let response = app
            .get(&format!("/files/{}/data?size={}", id, size), Some(&owner))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "size {}", size);
    }
}

#[tokio::test]
async fn test_listing_pages_and_parents() {
    let app = TestApp::new();
    let (_, owner) = app.signed_in_user().await;
    let (_, other) = app.signed_in_user().await;
    let bulk = app
        .upload(&owner, json!({ "name": "bulk", "type": "folder" }))
        .await;
    let bulk_id = id_of(&bulk);

    for i in 0..45 {
        app.upload(
            &owner,
            json!({ "name": format!("f{}", i), "type": "folder", "parentId": bulk_id }),
        )
        .await;
    }

    let mut seen = HashSet::new();
    let mut sizes = Vec::new();
    for page in 1..=4 {
        let response = app
            .get(
                &format!("/files?parentId={}&page={}", bulk_id, page),
                Some(&owner),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        let entries = response.json();
        let entries = entries.as_array().unwrap();
        sizes.push(entries.len());
        for entry in entries {
            assert!(seen.insert(id_of(entry)), "entry listed twice");
        }
    }
    assert_eq!(sizes, vec![20, 20, 5, 0]);
    assert_eq!(seen.len(), 45);

    // Root listing holds only the top folder; parentId defaults to root
    let root = app.get("/files", Some(&owner)).await.json();
    assert_eq!(root, json!([bulk]));
    assert_eq!(app.get("/files?parentId=0", Some(&owner)).await.json(), root);

    // Other users and bad parents see nothing
    assert_eq!(
        app.get(&format!("/files?parentId={}", bulk_id), Some(&other))
            .await
            .json(),
        json!([])
    );
    assert_eq!(
        app.get("/files?parentId=garbage", Some(&owner)).await.json(),
        json!([])
    );

    assert_eq!(app.get("/files", None).await.status, StatusCode::UNAUTHORIZED);
}
