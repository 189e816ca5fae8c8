use warbler_adapters::http::routes::RegisterResponse;
use warbler_core::ProfileRecord;

use crate::helpers::{TestApp, registration_body};

#[tokio::test]
async fn should_return_the_record_written_by_registration() {
    let app = TestApp::new().await;

    let registered = app
        .post_register(&registration_body("ada@example.com"))
        .await
        .json::<RegisterResponse>()
        .await
        .expect("Could not deserialize response body");

    let response = app.get_profile(registered.user_id.as_str()).await;
    assert_eq!(response.status().as_u16(), 200);

    let record = response
        .json::<ProfileRecord>()
        .await
        .expect("Could not deserialize response body");
    assert_eq!(
        record,
        ProfileRecord {
            email: "ada@example.com".into(),
            username: "warbler_fan".into(),
            full_name: "Ada Lovelace".into(),
            profile_image_url: registered.profile_image_url,
        }
    );
}

#[tokio::test]
async fn should_return_404_for_unknown_user() {
    let app = TestApp::new().await;

    let response = app.get_profile("missing").await;

    assert_eq!(response.status().as_u16(), 404);
}
