use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use base64::{Engine, engine::general_purpose::STANDARD};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use warbler_application::RegistrationPipeline;
use warbler_core::{
    AccountId, AccountStore, Email, FullName, ObjectStore, Password, ProfileImage, ProfileStore,
    RegistrationRequest, Username,
};

use super::error::RegistrationApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub username: String,
    pub full_name: String,
    /// Base64 of the picture file, any format the image decoder understands.
    pub profile_image: String,
}

impl TryFrom<RegisterRequest> for RegistrationRequest {
    type Error = RegistrationApiError;

    fn try_from(request: RegisterRequest) -> Result<Self, Self::Error> {
        Ok(RegistrationRequest::new(
            Email::try_from(request.email)?,
            Password::try_from(request.password)?,
            Username::try_from(request.username)?,
            FullName::try_from(request.full_name)?,
            ProfileImage::new(STANDARD.decode(request.profile_image.trim())?),
        ))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: AccountId,
    pub profile_image_url: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<O, A, P>(
    State(pipeline): State<RegistrationPipeline<O, A, P>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, RegistrationApiError>
where
    O: ObjectStore + Clone + 'static,
    A: AccountStore + Clone + 'static,
    P: ProfileStore + Clone + 'static,
{
    let request = RegistrationRequest::try_from(request)?;

    let (user_id, profile_image_url) = pipeline.register(request).await.into_result()?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            profile_image_url,
        }),
    ))
}
