//! Request and result messages exchanged with the network worker.
//!
//! `ApiRequest` travels from the main loop to the worker; every completed call
//! comes back as an `ApiEvent` wrapped in `AppEvent::Api`. Fetches carry the
//! reconciler sequence number and the status they were issued for, so the main
//! loop can discard responses that arrive after a newer poll or a tab switch.

use c2cmd_api::ApiError;
use c2cmd_core::types::{
    BatchOutcome, Decision, LearningDecision, LearningProposal, MetricsSnapshot, ReviewItem,
    StatusFilter,
};

/// One unit of network work for the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// List fetch for one status view. `seq` comes from
    /// `Reconciler::begin_poll` and tags the eventual response.
    FetchReviews { seq: u64, status: StatusFilter },
    FetchMetrics,
    FetchProposals,
    /// Single approve / reject / feedback decision on one item.
    Decide {
        id: String,
        decision: Decision,
        message: Option<String>,
    },
    /// One request approving every id in the current selection.
    BatchApprove { ids: Vec<String> },
    DecideLearning {
        session_id: String,
        decision: LearningDecision,
    },
}

/// Completed network call, successful or not. Failures ride inside the
/// `Result` rather than killing the worker — every error here is something
/// the main loop turns into a banner or a toast.
#[derive(Debug)]
pub enum ApiEvent {
    Reviews {
        seq: u64,
        status: StatusFilter,
        result: Result<Vec<ReviewItem>, ApiError>,
    },
    Metrics(Result<MetricsSnapshot, ApiError>),
    Proposals(Result<Vec<LearningProposal>, ApiError>),
    Decided {
        id: String,
        decision: Decision,
        result: Result<(), ApiError>,
    },
    Batched(Result<BatchOutcome, ApiError>),
    LearningDecided {
        session_id: String,
        result: Result<(), ApiError>,
    },
}
