use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warbler_core::{
    AccountError, EmailError, FullNameError, PasswordError, PersistError, ProfileStoreError,
    RegistrationFailure, RegistrationStage, UploadError, UsernameError,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<RegistrationStage>,
}

#[derive(Debug, Error)]
pub enum RegistrationApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Registration(#[from] RegistrationFailure),

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl RegistrationApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistrationApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RegistrationApiError::ProfileNotFound => StatusCode::NOT_FOUND,
            RegistrationApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistrationApiError::Registration(failure) => match failure {
                RegistrationFailure::Upload(UploadError::EncodingFailed(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                RegistrationFailure::Upload(
                    UploadError::TransferFailed(_) | UploadError::UrlUnavailable(_),
                ) => StatusCode::BAD_GATEWAY,
                RegistrationFailure::Upload(UploadError::Cancelled) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                RegistrationFailure::Account(AccountError::DuplicateEmail) => StatusCode::CONFLICT,
                RegistrationFailure::Account(AccountError::InvalidCredentials(_)) => {
                    StatusCode::BAD_REQUEST
                }
                RegistrationFailure::Account(AccountError::NetworkFailure(_)) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                RegistrationFailure::Persist(PersistError::WriteFailed(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn stage(&self) -> Option<RegistrationStage> {
        match self {
            RegistrationApiError::Registration(failure) => Some(failure.stage()),
            _ => None,
        }
    }
}

impl IntoResponse for RegistrationApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
            stage: self.stage(),
        });

        (self.status_code(), body).into_response()
    }
}

impl From<EmailError> for RegistrationApiError {
    fn from(error: EmailError) -> Self {
        RegistrationApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for RegistrationApiError {
    fn from(error: PasswordError) -> Self {
        RegistrationApiError::InvalidInput(error.to_string())
    }
}

impl From<UsernameError> for RegistrationApiError {
    fn from(error: UsernameError) -> Self {
        RegistrationApiError::InvalidInput(error.to_string())
    }
}

impl From<FullNameError> for RegistrationApiError {
    fn from(error: FullNameError) -> Self {
        RegistrationApiError::InvalidInput(error.to_string())
    }
}

impl From<base64::DecodeError> for RegistrationApiError {
    fn from(error: base64::DecodeError) -> Self {
        RegistrationApiError::InvalidInput(format!("profile image is not valid base64: {error}"))
    }
}

impl From<ProfileStoreError> for RegistrationApiError {
    fn from(error: ProfileStoreError) -> Self {
        match error {
            ProfileStoreError::NotFound => RegistrationApiError::ProfileNotFound,
            ProfileStoreError::WriteFailed(e) | ProfileStoreError::Unexpected(e) => {
                RegistrationApiError::UnexpectedError(e)
            }
        }
    }
}
