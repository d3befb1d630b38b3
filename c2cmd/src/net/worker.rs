//! Background task that owns the HTTP client.
//!
//! All communication is via channels: `ApiRequest` in, `AppEvent::Api` out.
//! Each request runs in its own spawned task over a cloned client, so a slow
//! poll never blocks a decision and polls issued while a mutation is in
//! flight complete independently. Ordering conflicts are resolved by the
//! receiver (sequence numbers and tombstones), not by serializing requests.

use c2cmd_api::ReviewsClient;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::event::AppEvent;
use crate::net::types::{ApiEvent, ApiRequest};

/// Spawns the dispatcher task. It runs until the request sender is dropped.
///
/// Send errors on `event_tx` are ignored — a dropped receiver means the main
/// loop has already exited and there is nobody left to inform.
pub fn spawn_api_worker(
    client: ReviewsClient,
    mut rx: UnboundedReceiver<ApiRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let client = client.clone();
            let tx = event_tx.clone();
            tokio::spawn(async move {
                let event = handle_request(&client, request).await;
                let _ = tx.send(AppEvent::Api(event));
            });
        }
    });
}

/// Executes one request and packages the outcome.
async fn handle_request(client: &ReviewsClient, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::FetchReviews { seq, status } => ApiEvent::Reviews {
            seq,
            status,
            result: client.fetch_reviews(status).await,
        },
        ApiRequest::FetchMetrics => ApiEvent::Metrics(client.fetch_metrics().await),
        ApiRequest::FetchProposals => {
            ApiEvent::Proposals(client.fetch_learning_proposals().await)
        }
        ApiRequest::Decide { id, decision, message } => {
            let result = client.post_decision(&id, decision, message.as_deref()).await;
            if let Err(e) = &result {
                log::warn!("decision {decision:?} on {id} failed: {e}");
            }
            ApiEvent::Decided { id, decision, result }
        }
        ApiRequest::BatchApprove { ids } => {
            log::info!("batch approving {} reviews", ids.len());
            ApiEvent::Batched(client.post_batch_approve(&ids).await)
        }
        ApiRequest::DecideLearning { session_id, decision } => {
            let result = client.post_learning_decision(&session_id, decision).await;
            ApiEvent::LearningDecided { session_id, result }
        }
    }
}
