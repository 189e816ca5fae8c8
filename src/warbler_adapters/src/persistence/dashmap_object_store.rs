use std::sync::Arc;

use dashmap::DashMap;
use warbler_core::{
    ObjectHandle, ObjectKey, ObjectStore, ObjectStoreError, ProgressCallback, TransferProgress,
};

pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object store kept in process memory.
///
/// Puts are copied chunk by chunk, yielding between chunks, so progress is
/// reported the same way a network store would.
#[derive(Clone)]
pub struct DashMapObjectStore {
    objects: Arc<DashMap<ObjectKey, StoredObject>>,
    public_base_url: String,
    chunk_size: usize,
}

impl DashMapObjectStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            public_base_url: public_base_url.into().trim_end_matches('/').to_owned(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn get(&self, key: &ObjectKey) -> Option<StoredObject> {
        self.objects.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait::async_trait]
impl ObjectStore for DashMapObjectStore {
    #[tracing::instrument(name = "Storing object in memory", skip_all, fields(%key))]
    async fn put(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<ObjectHandle, ObjectStoreError> {
        let total = bytes.len() as u64;
        let mut received = Vec::with_capacity(bytes.len());

        on_progress(TransferProgress {
            completed: 0,
            total,
        });
        for chunk in bytes.chunks(self.chunk_size) {
            received.extend_from_slice(chunk);
            on_progress(TransferProgress {
                completed: received.len() as u64,
                total,
            });
            tokio::task::yield_now().await;
        }

        self.objects.insert(
            key.clone(),
            StoredObject {
                bytes: received,
                content_type: content_type.to_owned(),
            },
        );
        Ok(ObjectHandle::new(key.clone(), total))
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String, ObjectStoreError> {
        if !self.objects.contains_key(handle.key()) {
            return Err(ObjectStoreError::NotFound);
        }
        Ok(format!("{}/{}", self.public_base_url, handle.key()))
    }

    #[tracing::instrument(name = "Deleting object from memory", skip_all, fields(key = %handle.key()))]
    async fn delete(&self, handle: &ObjectHandle) -> Result<(), ObjectStoreError> {
        self.objects
            .remove(handle.key())
            .map(|_| ())
            .ok_or(ObjectStoreError::NotFound)
    }
}
