use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    identifiers::{AccountId, ObjectHandle, ObjectKey},
    password::Password,
    profile::ProfileRecord,
    registration::TransferProgress,
};

/// Receives byte counts while an object store transfers data. Stores may call
/// it from whatever task drives their I/O.
pub type ProgressCallback = Arc<dyn Fn(TransferProgress) + Send + Sync>;

// ObjectStore port trait and errors
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("Transfer failed: {0}")]
    Transfer(String),
    #[error("Object not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    Unexpected(String),
}

impl PartialEq for ObjectStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Transfer(_), Self::Transfer(_))
                | (Self::NotFound, Self::NotFound)
                | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        key: &ObjectKey,
        bytes: Vec<u8>,
        content_type: &str,
        on_progress: ProgressCallback,
    ) -> Result<ObjectHandle, ObjectStoreError>;
    async fn resolve_url(&self, handle: &ObjectHandle) -> Result<String, ObjectStoreError>;
    async fn delete(&self, handle: &ObjectHandle) -> Result<(), ObjectStoreError>;
}

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Network error: {0}")]
    Network(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateEmail, Self::DuplicateEmail)
                | (Self::InvalidCredentials(_), Self::InvalidCredentials(_))
                | (Self::Network(_), Self::Network(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccountId, AccountStoreError>;
}

// ProfileStore port trait and errors
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Profile not found")]
    NotFound,
    #[error("Unexpected error {0}")]
    Unexpected(String),
}

impl PartialEq for ProfileStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::WriteFailed(_), Self::WriteFailed(_))
                | (Self::NotFound, Self::NotFound)
                | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Merges `record` into whatever is stored under `account_id`.
    async fn write_record(
        &self,
        account_id: &AccountId,
        record: ProfileRecord,
    ) -> Result<(), ProfileStoreError>;
    async fn fetch_record(&self, account_id: &AccountId)
    -> Result<ProfileRecord, ProfileStoreError>;
}
