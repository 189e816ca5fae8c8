use fake::{Fake, faker::internet::en::SafeEmail};
use warbler_adapters::http::routes::{ErrorResponse, RegisterResponse};
use warbler_core::{ObjectKey, RegistrationStage};

use crate::helpers::{TestApp, registration_body};

#[tokio::test]
async fn should_return_201_with_user_id_and_image_url() {
    let app = TestApp::new().await;
    let email: String = SafeEmail().fake();

    let response = app.post_register(&registration_body(&email)).await;

    assert_eq!(response.status().as_u16(), 201);
    let body = response
        .json::<RegisterResponse>()
        .await
        .expect("Could not deserialize response body");

    assert!(!body.user_id.as_str().is_empty());
    assert!(
        body.profile_image_url
            .starts_with("https://cdn.warbler.test/profile_images/")
    );

    let key = body
        .profile_image_url
        .trim_start_matches("https://cdn.warbler.test/");
    let stored = app
        .object_store
        .get(&ObjectKey::new(key))
        .expect("Uploaded image should be stored");
    assert_eq!(stored.content_type, "image/jpeg");
    assert_eq!(&stored.bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(app.profile_store.len(), 1);
}

#[tokio::test]
async fn should_return_409_and_remove_upload_if_email_already_exists() {
    let app = TestApp::new().await;
    let body = registration_body("a@b.com");

    let first = app.post_register(&body).await;
    assert_eq!(first.status().as_u16(), 201);
    assert_eq!(app.object_store.len(), 1);

    let second = app.post_register(&body).await;
    assert_eq!(second.status().as_u16(), 409);

    let error = second
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialize response body");
    assert_eq!(error.stage, Some(RegistrationStage::AccountCreation));
    assert_eq!(app.object_store.len(), 1);
    assert_eq!(app.profile_store.len(), 1);
}

#[tokio::test]
async fn should_return_422_and_store_nothing_if_image_is_undecodable() {
    let app = TestApp::new().await;
    let mut body = registration_body("a@b.com");
    body["profileImage"] = serde_json::Value::from("bm90IGFuIGltYWdl");

    let response = app.post_register(&body).await;

    assert_eq!(response.status().as_u16(), 422);
    let error = response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialize response body");
    assert_eq!(error.stage, Some(RegistrationStage::Upload));
    assert!(app.object_store.is_empty());
    assert!(app.account_store.is_empty().await);
}

#[tokio::test]
async fn should_return_400_and_remove_upload_if_password_is_weak() {
    let app = TestApp::new().await;
    let mut body = registration_body("a@b.com");
    body["password"] = serde_json::Value::from("123");

    let response = app.post_register(&body).await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(app.object_store.is_empty());
    assert!(app.profile_store.is_empty());
}

#[tokio::test]
async fn should_return_400_if_input_is_invalid() {
    let app = TestApp::new().await;

    let cases = [
        ("email", serde_json::Value::from("not-an-email")),
        ("password", serde_json::Value::from("")),
        ("username", serde_json::Value::from("has spaces!")),
        ("fullName", serde_json::Value::from("   ")),
        ("profileImage", serde_json::Value::from("%%% not base64 %%%")),
    ];

    for (field, value) in cases {
        let mut body = registration_body("a@b.com");
        body[field] = value;

        let response = app.post_register(&body).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for invalid {field}"
        );
    }

    assert!(app.object_store.is_empty());
}

#[tokio::test]
async fn should_return_422_if_body_is_malformed() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&serde_json::json!({ "email": "a@b.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 422);
}
