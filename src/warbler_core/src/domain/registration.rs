use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    email::Email, full_name::FullName, identifiers::AccountId, password::Password,
    profile_image::ProfileImage, username::Username,
};

/// Everything needed to register one account. Fields are fixed at construction.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    email: Email,
    password: Password,
    username: Username,
    full_name: FullName,
    profile_image: ProfileImage,
}

impl RegistrationRequest {
    pub fn new(
        email: Email,
        password: Password,
        username: Username,
        full_name: FullName,
        profile_image: ProfileImage,
    ) -> Self {
        Self {
            email,
            password,
            username,
            full_name,
            profile_image,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn profile_image(&self) -> &ProfileImage {
        &self.profile_image
    }
}

/// Raw byte counts reported by an object store while a put is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub completed: u64,
    pub total: u64,
}

/// Upload completion percentage, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct UploadProgress(f64);

impl UploadProgress {
    pub const MIN: UploadProgress = UploadProgress(0.0);
    pub const MAX: UploadProgress = UploadProgress(100.0);

    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::MIN;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl From<TransferProgress> for UploadProgress {
    fn from(progress: TransferProgress) -> Self {
        if progress.total == 0 {
            return Self::MIN;
        }
        Self::new(progress.completed as f64 / progress.total as f64 * 100.0)
    }
}

impl fmt::Display for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStage {
    Upload,
    AccountCreation,
    Persistence,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistrationStage::Upload => "upload",
            RegistrationStage::AccountCreation => "account_creation",
            RegistrationStage::Persistence => "persistence",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Profile image could not be encoded: {0}")]
    EncodingFailed(String),
    #[error("Profile image transfer failed: {0}")]
    TransferFailed(String),
    #[error("Uploaded profile image has no retrievable URL: {0}")]
    UrlUnavailable(String),
    #[error("Registration was cancelled before the account was created")]
    Cancelled,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("An account with this email already exists")]
    DuplicateEmail,
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Account store unreachable: {0}")]
    NetworkFailure(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistError {
    #[error("Profile record could not be written: {0}")]
    WriteFailed(String),
}

/// Why a submission ended without an account and profile in place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationFailure {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl RegistrationFailure {
    pub fn stage(&self) -> RegistrationStage {
        match self {
            RegistrationFailure::Upload(_) => RegistrationStage::Upload,
            RegistrationFailure::Account(_) => RegistrationStage::AccountCreation,
            RegistrationFailure::Persist(_) => RegistrationStage::Persistence,
        }
    }
}

/// Terminal result of a submission. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success {
        user_id: AccountId,
        profile_image_url: String,
    },
    Failure(RegistrationFailure),
}

impl RegistrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Success { .. })
    }

    pub fn into_result(self) -> Result<(AccountId, String), RegistrationFailure> {
        match self {
            RegistrationOutcome::Success {
                user_id,
                profile_image_url,
            } => Ok((user_id, profile_image_url)),
            RegistrationOutcome::Failure(failure) => Err(failure),
        }
    }
}

impl From<RegistrationFailure> for RegistrationOutcome {
    fn from(failure: RegistrationFailure) -> Self {
        RegistrationOutcome::Failure(failure)
    }
}

/// Item of a submission's event stream: zero or more progress reports, then
/// exactly one completion.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationEvent {
    Progress(UploadProgress),
    Completed(RegistrationOutcome),
}
