use futures::stream;
use reqwest::{Body, Client, StatusCode, Url, header};
use secrecy::{ExposeSecret, Secret};
use warbler_core::{
    ObjectHandle, ObjectKey, ObjectStore, ObjectStoreError, ProgressCallback, TransferProgress,
};

/// Object store speaking plain HTTP to a bucket gateway:
/// `PUT`/`HEAD`/`DELETE {base_url}/{bucket}/{key}` with a bearer token.
/// Objects are served to clients from `{public_base_url}/{bucket}/{key}`.
#[derive(Clone)]
pub struct HttpObjectStore {
    http_client: Client,
    base_url: Url,
    public_base_url: Url,
    bucket: String,
    authorization_token: Secret<String>,
    chunk_size: usize,
}

impl HttpObjectStore {
    pub fn new(
        base_url: Url,
        public_base_url: Url,
        bucket: String,
        authorization_token: Secret<String>,
        chunk_size: usize,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            public_base_url,
            bucket,
            authorization_token,
            chunk_size: chunk_size.max(1),
        }
    }

    fn object_url(&self, base: &Url, key: &ObjectKey) -> Url {
        let path = format!(
            "{}/{}/{}",
            base.path().trim_end_matches('/'),
            self.bucket,
            key
        );
        let mut url = base.clone();
        url.set_path(&path);
        url
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.authorization_token.expose_secret())
    }
}

#[async_trait::async_trait]
impl ObjectStore for HttpObjectStore {
    #[tracing::instrument(name = "Uploading object over HTTP", skip_all, fields(%key))]
    async fn put(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<ObjectHandle, ObjectStoreError> {
        let url = self.object_url(&self.base_url, key);
        let total = bytes.len() as u64;

        let chunks: Vec<Vec<u8>> = bytes.chunks(self.chunk_size).map(<[u8]>::to_vec).collect();
        let mut sent = 0u64;
        on_progress(TransferProgress {
            completed: sent,
            total,
        });
        // Counts bytes as they are handed to the connection
        let body = stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            on_progress(TransferProgress {
                completed: sent,
                total,
            });
            Ok::<_, std::io::Error>(chunk)
        }));

        self.http_client
            .put(url)
            .header(header::AUTHORIZATION, self.bearer())
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, total)
            .body(Body::wrap_stream(body))
            .send()
            .await
            .map_err(|e| ObjectStoreError::Transfer(e.to_string()))?
            .error_for_status()
            .map_err(|e| ObjectStoreError::Transfer(e.to_string()))?;

        Ok(ObjectHandle::new(key.clone(), total))
    }

    #[tracing::instrument(name = "Resolving object URL", skip_all, fields(key = %handle.key()))]
    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String, ObjectStoreError> {
        let response = self
            .http_client
            .head(self.object_url(&self.base_url, handle.key()))
            .header(header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(|e| ObjectStoreError::Transfer(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                Ok(self.object_url(&self.public_base_url, handle.key()).to_string())
            }
            StatusCode::NOT_FOUND => Err(ObjectStoreError::NotFound),
            status => Err(ObjectStoreError::Unexpected(format!(
                "object lookup returned {status}"
            ))),
        }
    }

    #[tracing::instrument(name = "Deleting object over HTTP", skip_all, fields(key = %handle.key()))]
    async fn delete(&self, handle: &ObjectHandle) -> Result<(), ObjectStoreError> {
        let response = self
            .http_client
            .delete(self.object_url(&self.base_url, handle.key()))
            .header(header::AUTHORIZATION, self.bearer())
            .send()
            .await
            .map_err(|e| ObjectStoreError::Transfer(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ObjectStoreError::NotFound),
            status => Err(ObjectStoreError::Unexpected(format!(
                "object delete returned {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer, chunk_size: usize) -> HttpObjectStore {
        let base = Url::parse(&server.uri()).unwrap();
        HttpObjectStore::new(
            base,
            Url::parse("https://cdn.warbler.test/media").unwrap(),
            "avatars".to_string(),
            Secret::new("s3cr3t".to_string()),
            chunk_size,
            Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
        )
    }

    fn handle(key: &str) -> ObjectHandle {
        ObjectHandle::new(ObjectKey::new(key), 3)
    }

    #[tokio::test]
    async fn put_streams_body_with_token_and_reports_progress() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/avatars/profile_images/abc"))
            .and(header("Authorization", "Bearer s3cr3t"))
            .and(header("Content-Type", "image/jpeg"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p.completed));

        let handle = store(&server, 4)
            .put(&ObjectKey::new("profile_images/abc"), vec![9; 10], "image/jpeg", callback)
            .await
            .unwrap();

        assert_eq!(handle.size(), 10);
        assert_eq!(*seen.lock().unwrap(), vec![0, 4, 8, 10]);
        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].body, vec![9; 10]);
    }

    #[tokio::test]
    async fn rejected_put_is_a_transfer_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = store(&server, 1024)
            .put(
                &ObjectKey::new("profile_images/abc"),
                vec![1, 2, 3],
                "image/jpeg",
                Arc::new(|_| {}),
            )
            .await;

        assert!(matches!(result, Err(ObjectStoreError::Transfer(_))));
    }

    #[tokio::test]
    async fn resolve_confirms_object_then_returns_public_url() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/avatars/profile_images/abc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = store(&server, 1024)
            .resolve_url(&handle("profile_images/abc"))
            .await
            .unwrap();

        assert_eq!(url, "https://cdn.warbler.test/media/avatars/profile_images/abc");
    }

    #[tokio::test]
    async fn resolve_of_missing_object_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = store(&server, 1024)
            .resolve_url(&handle("profile_images/gone"))
            .await;

        assert_eq!(result, Err(ObjectStoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_sends_authorized_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/avatars/profile_images/abc"))
            .and(header("Authorization", "Bearer s3cr3t"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store(&server, 1024)
            .delete(&handle("profile_images/abc"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = store(&server, 1024)
            .delete(&handle("profile_images/abc"))
            .await;

        assert!(matches!(result, Err(ObjectStoreError::Unexpected(_))));
    }
}
