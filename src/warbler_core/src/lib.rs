pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    full_name::{FullName, FullNameError},
    identifiers::{AccountId, ObjectHandle, ObjectKey, PROFILE_IMAGES_PREFIX},
    password::{MIN_PASSWORD_LENGTH, Password, PasswordError},
    profile::ProfileRecord,
    profile_image::ProfileImage,
    registration::{
        AccountError, PersistError, RegistrationEvent, RegistrationFailure, RegistrationOutcome,
        RegistrationRequest, RegistrationStage, TransferProgress, UploadError, UploadProgress,
    },
    username::{Username, UsernameError},
};

pub use ports::stores::{
    AccountStore, AccountStoreError, ObjectStore, ObjectStoreError, ProfileStore,
    ProfileStoreError, ProgressCallback,
};
