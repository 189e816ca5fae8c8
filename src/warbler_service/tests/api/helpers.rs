use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use tokio::net::TcpListener;
use warbler_adapters::{
    DashMapObjectStore, DashMapProfileStore, HashMapAccountStore,
    config::test::{APP_ADDRESS, PUBLIC_BASE_URL},
};
use warbler_application::{PipelineConfig, RegistrationPipeline};
use warbler_service::RegistrationService;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub object_store: DashMapObjectStore,
    pub account_store: HashMapAccountStore,
    pub profile_store: DashMapProfileStore,
}

impl TestApp {
    pub async fn new() -> Self {
        let object_store = DashMapObjectStore::new(PUBLIC_BASE_URL).with_chunk_size(256);
        let account_store = HashMapAccountStore::new();
        let profile_store = DashMapProfileStore::new();

        let pipeline = RegistrationPipeline::new(
            object_store.clone(),
            account_store.clone(),
            profile_store.clone(),
            PipelineConfig::default(),
        );
        let service = RegistrationService::new(pipeline, profile_store.clone());

        let listener = TcpListener::bind(APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            object_store,
            account_store,
            profile_store,
        }
    }

    pub async fn post_register<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(format!("{}/register", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_register_stream<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .post(format!("{}/register/stream", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_profile(&self, user_id: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}/users/{}", &self.address, user_id))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// A small PNG, base64 encoded the way clients send it.
pub fn encoded_png() -> String {
    let picture = RgbImage::from_fn(48, 48, |x, y| Rgb([(x * 5) as u8, (y * 5) as u8, 128]));
    let mut bytes = Cursor::new(Vec::new());
    picture
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode test picture");
    STANDARD.encode(bytes.into_inner())
}

pub fn registration_body(email: &str) -> Value {
    serde_json::json!({
        "email": email,
        "password": "password123",
        "username": "warbler_fan",
        "fullName": "Ada Lovelace",
        "profileImage": encoded_png(),
    })
}
