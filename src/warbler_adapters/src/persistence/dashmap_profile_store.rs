use std::sync::Arc;

use dashmap::DashMap;
use warbler_core::{AccountId, ProfileRecord, ProfileStore, ProfileStoreError};

#[derive(Default, Clone)]
pub struct DashMapProfileStore {
    records: Arc<DashMap<AccountId, ProfileRecord>>,
}

impl DashMapProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl ProfileStore for DashMapProfileStore {
    async fn write_record(
        &self,
        account_id: &AccountId,
        record: ProfileRecord,
    ) -> Result<(), ProfileStoreError> {
        self.records.insert(account_id.clone(), record);
        Ok(())
    }

    async fn fetch_record(
        &self,
        account_id: &AccountId,
    ) -> Result<ProfileRecord, ProfileStoreError> {
        self.records
            .get(account_id)
            .map(|entry| entry.value().clone())
            .ok_or(ProfileStoreError::NotFound)
    }
}
