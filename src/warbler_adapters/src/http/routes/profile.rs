use axum::{
    Json,
    extract::{Path, State},
};
use warbler_core::{AccountId, ProfileRecord, ProfileStore};

use super::error::RegistrationApiError;

#[tracing::instrument(name = "Get profile", skip(profile_store))]
pub async fn get_profile<P>(
    State(profile_store): State<P>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileRecord>, RegistrationApiError>
where
    P: ProfileStore + Clone + 'static,
{
    let record = profile_store
        .fetch_record(&AccountId::new(user_id))
        .await?;

    Ok(Json(record))
}
