use std::convert::Infallible;

use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use warbler_application::RegistrationPipeline;
use warbler_core::{
    AccountStore, ObjectStore, ProfileStore, RegistrationEvent, RegistrationOutcome,
    RegistrationRequest,
};

use super::error::RegistrationApiError;
use super::register::RegisterRequest;

/// Same input as `register`, answered with server-sent events: `progress`
/// events carrying `{"percent": ..}`, then a single `outcome` event.
///
/// A client that disconnects does not cancel the registration.
#[tracing::instrument(name = "Register with progress", skip_all)]
pub async fn register_stream<O, A, P>(
    State(pipeline): State<RegistrationPipeline<O, A, P>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, RegistrationApiError>
where
    O: ObjectStore + Clone + 'static,
    A: AccountStore + Clone + 'static,
    P: ProfileStore + Clone + 'static,
{
    let request = RegistrationRequest::try_from(request)?;

    let events = pipeline
        .submit(request)
        .map(|event| Ok::<_, Infallible>(to_sse_event(event)));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn to_sse_event(event: RegistrationEvent) -> Event {
    match event {
        RegistrationEvent::Progress(progress) => Event::default()
            .event("progress")
            .data(serde_json::json!({ "percent": progress }).to_string()),
        RegistrationEvent::Completed(outcome) => Event::default()
            .event("outcome")
            .data(outcome_json(outcome).to_string()),
    }
}

fn outcome_json(outcome: RegistrationOutcome) -> serde_json::Value {
    match outcome {
        RegistrationOutcome::Success {
            user_id,
            profile_image_url,
        } => serde_json::json!({
            "status": "success",
            "userId": user_id,
            "profileImageUrl": profile_image_url,
        }),
        RegistrationOutcome::Failure(failure) => serde_json::json!({
            "status": "failure",
            "stage": failure.stage(),
            "error": failure.to_string(),
        }),
    }
}
