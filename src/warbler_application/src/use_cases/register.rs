use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::Instrument;
use warbler_core::{
    AccountError, AccountId, AccountStore, AccountStoreError, ObjectHandle, ObjectKey, ObjectStore,
    PersistError, ProfileRecord, ProfileStore, ProgressCallback, RegistrationEvent,
    RegistrationFailure, RegistrationOutcome, RegistrationRequest, UploadError,
};

use crate::image_encoding::{JPEG_CONTENT_TYPE, JpegQuality, encode_profile_image};
use crate::progress::ProgressGate;
use crate::submission::{
    CancelSignal, RegistrationHandle, RegistrationSubmission, cancellation,
};

/// Tunables for [`RegistrationPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub jpeg_quality: JpegQuality,
    /// Applies to the put, the URL lookup and compensating deletes.
    pub upload_timeout: Duration,
    pub account_timeout: Duration,
    pub persist_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: JpegQuality::default(),
            upload_timeout: Duration::from_secs(60),
            account_timeout: Duration::from_secs(15),
            persist_timeout: Duration::from_secs(15),
        }
    }
}

/// Registration use case: upload the profile image, create the account, then
/// write the profile record.
///
/// Stages run strictly in that order and each starts only after the previous
/// one succeeded. If account creation fails after the image was uploaded, the
/// image is deleted on a best-effort basis. A failed profile write is reported
/// but not compensated; the account stays.
#[derive(Clone)]
pub struct RegistrationPipeline<O, A, P> {
    object_store: O,
    account_store: A,
    profile_store: P,
    config: PipelineConfig,
}

impl<O, A, P> RegistrationPipeline<O, A, P>
where
    O: ObjectStore,
    A: AccountStore,
    P: ProfileStore,
{
    pub fn new(object_store: O, account_store: A, profile_store: P, config: PipelineConfig) -> Self {
        Self {
            object_store,
            account_store,
            profile_store,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[tracing::instrument(
        name = "RegistrationPipeline::run",
        skip_all,
        fields(username = %request.username())
    )]
    async fn run(
        &self,
        request: &RegistrationRequest,
        progress: Arc<ProgressGate>,
        cancel: &mut CancelSignal,
    ) -> RegistrationOutcome {
        match self.run_stages(request, progress, cancel).await {
            Ok((user_id, profile_image_url)) => {
                tracing::info!(%user_id, "Registration completed");
                RegistrationOutcome::Success {
                    user_id,
                    profile_image_url,
                }
            }
            Err(failure) => {
                tracing::warn!(stage = %failure.stage(), error = %failure, "Registration failed");
                RegistrationOutcome::Failure(failure)
            }
        }
    }

    async fn run_stages(
        &self,
        request: &RegistrationRequest,
        progress: Arc<ProgressGate>,
        cancel: &mut CancelSignal,
    ) -> Result<(AccountId, String), RegistrationFailure> {
        let (handle, profile_image_url) = self.upload(request, progress, cancel).await?;

        // Last chance to back out. From here on the submission is not cancellable.
        if cancel.is_cancelled() {
            self.discard_upload(&handle).await;
            return Err(UploadError::Cancelled.into());
        }

        let account_id = match self.create_account(request).await {
            Ok(account_id) => account_id,
            Err(e) => {
                self.discard_upload(&handle).await;
                return Err(e.into());
            }
        };

        self.persist_profile(request, &account_id, profile_image_url.clone())
            .await?;

        Ok((account_id, profile_image_url))
    }

    /// Encodes, puts and resolves the profile image. On error nothing is left
    /// behind in the object store, as far as this pipeline can tell.
    #[tracing::instrument(name = "Uploading profile image", skip_all)]
    async fn upload(
        &self,
        request: &RegistrationRequest,
        progress: Arc<ProgressGate>,
        cancel: &mut CancelSignal,
    ) -> Result<(ObjectHandle, String), UploadError> {
        if cancel.is_cancelled() {
            return Err(UploadError::Cancelled);
        }

        let encoded = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(UploadError::Cancelled),
            encoded = encode_profile_image(request.profile_image(), self.config.jpeg_quality) => {
                encoded.map_err(|e| UploadError::EncodingFailed(e.to_string()))?
            }
        };

        let key = ObjectKey::generate();
        let gate = progress.clone();
        let on_progress: ProgressCallback = Arc::new(move |transfer| gate.report(transfer));
        let put = timeout(
            self.config.upload_timeout,
            self.object_store
                .put(&key, encoded, JPEG_CONTENT_TYPE, on_progress),
        );

        let put_result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UploadError::Cancelled),
            result = put => match result {
                Ok(Ok(handle)) => Ok(handle),
                Ok(Err(e)) => Err(UploadError::TransferFailed(e.to_string())),
                Err(_) => Err(UploadError::TransferFailed(timed_out(self.config.upload_timeout))),
            },
        };
        progress.close();
        let handle = put_result?;
        tracing::debug!(key = %handle.key(), size = handle.size(), "Profile image stored");

        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UploadError::Cancelled),
            result = timeout(self.config.upload_timeout, self.object_store.resolve_url(&handle)) => {
                match result {
                    Ok(Ok(url)) => Ok(url),
                    Ok(Err(e)) => Err(UploadError::UrlUnavailable(e.to_string())),
                    Err(_) => Err(UploadError::UrlUnavailable(timed_out(self.config.upload_timeout))),
                }
            }
        };

        match resolved {
            Ok(url) => Ok((handle, url)),
            Err(e) => {
                self.discard_upload(&handle).await;
                Err(e)
            }
        }
    }

    #[tracing::instrument(name = "Creating account", skip_all)]
    async fn create_account(&self, request: &RegistrationRequest) -> Result<AccountId, AccountError> {
        let create = self
            .account_store
            .create_account(request.email(), request.password());

        match timeout(self.config.account_timeout, create).await {
            Ok(result) => result.map_err(account_error),
            Err(_) => Err(AccountError::NetworkFailure(timed_out(
                self.config.account_timeout,
            ))),
        }
    }

    #[tracing::instrument(name = "Persisting profile record", skip_all, fields(%account_id))]
    async fn persist_profile(
        &self,
        request: &RegistrationRequest,
        account_id: &AccountId,
        profile_image_url: String,
    ) -> Result<(), PersistError> {
        let record = ProfileRecord {
            email: request.email().as_str().to_owned(),
            username: request.username().as_str().to_owned(),
            full_name: request.full_name().as_str().to_owned(),
            profile_image_url,
        };

        let write = self.profile_store.write_record(account_id, record);
        match timeout(self.config.persist_timeout, write).await {
            Ok(result) => result.map_err(|e| PersistError::WriteFailed(e.to_string())),
            Err(_) => Err(PersistError::WriteFailed(timed_out(
                self.config.persist_timeout,
            ))),
        }
    }

    /// Best-effort removal of an image no account will ever point to.
    /// Failures are logged and never change the outcome.
    #[tracing::instrument(name = "Discarding orphaned profile image", skip_all, fields(key = %handle.key()))]
    async fn discard_upload(&self, handle: &ObjectHandle) {
        match timeout(self.config.upload_timeout, self.object_store.delete(handle)).await {
            Ok(Ok(())) => tracing::info!("Orphaned profile image removed"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Could not remove orphaned profile image"),
            Err(_) => tracing::warn!("Timed out removing orphaned profile image"),
        }
    }
}

impl<O, A, P> RegistrationPipeline<O, A, P>
where
    O: ObjectStore + Clone + 'static,
    A: AccountStore + Clone + 'static,
    P: ProfileStore + Clone + 'static,
{
    /// Runs a registration and waits for its outcome. Progress is only logged.
    ///
    /// The stages run on their own task: dropping this future neither cancels
    /// a started account creation nor skips deleting an orphaned image.
    pub async fn register(&self, request: RegistrationRequest) -> RegistrationOutcome {
        let pipeline = self.clone();
        let task = tokio::spawn(
            async move {
                let (_canceller, mut signal) = cancellation();
                let gate = Arc::new(ProgressGate::new(|progress| {
                    tracing::debug!(%progress, "Profile image upload progress");
                }));
                pipeline.run(&request, gate, &mut signal).await
            }
            .instrument(tracing::Span::current()),
        );

        match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                tracing::error!(error = %e, "Registration task was aborted");
                RegistrationFailure::from(UploadError::Cancelled).into()
            }
        }
    }

    /// Starts a registration in the background and returns its event stream.
    pub fn submit(&self, request: RegistrationRequest) -> RegistrationSubmission {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (canceller, mut signal) = cancellation();

        let progress_tx = events_tx.clone();
        let gate = Arc::new(ProgressGate::new(move |progress| {
            let _ = progress_tx.send(RegistrationEvent::Progress(progress));
        }));

        let pipeline = self.clone();
        tokio::spawn(
            async move {
                let outcome = pipeline.run(&request, gate, &mut signal).await;
                // The receiver may be gone; the registration still counts.
                let _ = events_tx.send(RegistrationEvent::Completed(outcome));
            }
            .instrument(tracing::Span::current()),
        );

        RegistrationSubmission::new(UnboundedReceiverStream::new(events_rx), canceller)
    }

    /// Callback flavour of [`Self::submit`]. `on_progress` runs zero or more
    /// times, then `on_complete` runs exactly once.
    pub fn submit_with_callbacks<F, C>(
        &self,
        request: RegistrationRequest,
        mut on_progress: F,
        on_complete: C,
    ) -> RegistrationHandle
    where
        F: FnMut(warbler_core::UploadProgress) + Send + 'static,
        C: FnOnce(RegistrationOutcome) + Send + 'static,
    {
        let mut submission = self.submit(request);
        let canceller = submission.canceller();

        let task = tokio::spawn(async move {
            while let Some(event) = submission.next().await {
                match event {
                    RegistrationEvent::Progress(progress) => on_progress(progress),
                    RegistrationEvent::Completed(outcome) => {
                        on_complete(outcome);
                        return;
                    }
                }
            }
            tracing::error!("Registration ended without an outcome");
        });

        RegistrationHandle::new(canceller, task)
    }
}

fn account_error(error: AccountStoreError) -> AccountError {
    match error {
        AccountStoreError::DuplicateEmail => AccountError::DuplicateEmail,
        AccountStoreError::InvalidCredentials(reason) => AccountError::InvalidCredentials(reason),
        AccountStoreError::Network(reason) => AccountError::NetworkFailure(reason),
    }
}

fn timed_out(limit: Duration) -> String {
    format!("timed out after {limit:?}")
}
