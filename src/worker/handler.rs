//! Worker executing Data API calls.
//!
//! [`ApiWorker`] owns the Data API handle and turns each [`WorkerMessage`]
//! into the matching [`Loader`] call. It never fails: every error is carried
//! back inside the [`WorkerResponse`] so the dispatcher can surface it.

use crate::api::DataApi;
use crate::app::loader::Loader;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tracing::Instrument;

/// Executes worker messages against a Data API.
#[derive(Clone)]
pub struct ApiWorker {
    api: Arc<dyn DataApi>,
}

impl std::fmt::Debug for ApiWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiWorker").finish_non_exhaustive()
    }
}

impl ApiWorker {
    #[must_use]
    pub fn new(api: Arc<dyn DataApi>) -> Self {
        Self { api }
    }

    fn loader(&self, message: &WorkerMessage) -> Loader {
        Loader::new(message.resource(), Arc::clone(&self.api))
    }

    /// Logs the outcome of a finished operation.
    fn log_outcome<T, E: std::fmt::Display>(operation: &str, result: &Result<T, E>) {
        match result {
            Ok(_) => tracing::debug!(operation = operation, "worker operation successful"),
            Err(e) => tracing::debug!(operation = operation, error = %e, "worker operation failed"),
        }
    }

    /// Processes one message and returns its response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let loader = self.loader(&message);
        let resource = loader.resource();
        let span = tracing::debug_span!("worker_handle_message", resource = %resource, message_type = ?message);

        async move {
            match message {
                WorkerMessage::LoadPage { token, filter } => {
                    let result = loader.load(&filter).await;
                    Self::log_outcome("load page", &result);
                    WorkerResponse::PageLoaded {
                        resource,
                        token,
                        result,
                    }
                }
                WorkerMessage::FetchRecord { id, .. } => {
                    let result = loader.fetch_one(&id).await;
                    Self::log_outcome("fetch record", &result);
                    WorkerResponse::RecordFetched { resource, id, result }
                }
                WorkerMessage::DeleteRecord { id, .. } => {
                    let result = loader.delete(&id).await;
                    Self::log_outcome("delete record", &result);
                    WorkerResponse::RecordDeleted { resource, id, result }
                }
                WorkerMessage::SaveRecord { submission, .. } => {
                    let created = submission.id.is_none();
                    let result = loader.save(submission).await;
                    Self::log_outcome(if created { "create record" } else { "update record" }, &result);
                    WorkerResponse::RecordSaved {
                        resource,
                        created,
                        result,
                    }
                }
                WorkerMessage::SetWishlist { id, wishlisted, .. } => {
                    let result = loader.set_wishlist(&id, wishlisted).await;
                    Self::log_outcome("set wishlist", &result);
                    WorkerResponse::WishlistUpdated {
                        resource,
                        id,
                        wishlisted,
                        result,
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
