//! The review repository client: typed wrappers over the `/api/reviews`
//! JSON endpoints.
//!
//! Every response uses the `{success, …, error?}` envelope; `success:false`
//! becomes [`ApiError::Api`] carrying the server's message. Request bodies are
//! camelCase, matching the backend's conventions. The client is `Clone` and
//! cheap to clone (it shares the underlying `reqwest` connection pool), which
//! lets the worker run a poll and a decision concurrently.

use serde::{Deserialize, Serialize};

use c2cmd_core::types::{
    BatchOutcome, Decision, LearningDecision, LearningProposal, MetricsSnapshot, ReviewItem,
    StatusFilter,
};

use crate::error::ApiError;

/// Client for the AgentC2 review API, bound to one base URL.
#[derive(Debug, Clone)]
pub struct ReviewsClient {
    http: reqwest::Client,
    base_url: String,
}

// -- response envelopes ------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ReviewsEnvelope {
    success: bool,
    #[serde(default)]
    reviews: Vec<ReviewItem>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricsEnvelope {
    success: bool,
    #[serde(default)]
    metrics: Option<MetricsSnapshot>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LearningEnvelope {
    success: bool,
    #[serde(default, rename = "learningProposals")]
    learning_proposals: Vec<LearningProposal>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DecisionEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchEnvelope {
    success: bool,
    #[serde(default, rename = "successCount")]
    success_count: u64,
    #[serde(default, rename = "totalCount")]
    total_count: u64,
    #[serde(default)]
    error: Option<String>,
}

// -- request bodies ----------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecisionBody<'a> {
    approval_request_id: &'a str,
    decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchItem<'a> {
    approval_request_id: &'a str,
    decision: Decision,
}

#[derive(Debug, Serialize)]
struct BatchBody<'a> {
    items: Vec<BatchItem<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LearningBody<'a> {
    r#type: &'static str,
    session_id: &'a str,
    decision: LearningDecision,
}

impl ReviewsClient {
    /// Creates a client for `base_url` (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http: reqwest::Client::new(), base_url }
    }

    fn reviews_url(&self) -> String {
        format!("{}/api/reviews", self.base_url)
    }

    /// `GET /api/reviews?status=…` — the canonical item list for one status.
    pub async fn fetch_reviews(&self, status: StatusFilter) -> Result<Vec<ReviewItem>, ApiError> {
        let env: ReviewsEnvelope = self
            .http
            .get(self.reviews_url())
            .query(&[("status", status.as_str())])
            .send()
            .await?
            .json()
            .await?;
        if env.success {
            Ok(env.reviews)
        } else {
            Err(ApiError::from_envelope(env.error))
        }
    }

    /// `GET /api/reviews?action=metrics` — aggregate counters for the header.
    pub async fn fetch_metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        let env: MetricsEnvelope = self
            .http
            .get(self.reviews_url())
            .query(&[("action", "metrics")])
            .send()
            .await?
            .json()
            .await?;
        match (env.success, env.metrics) {
            (true, Some(metrics)) => Ok(metrics),
            (true, None) => Err(ApiError::Api("metrics missing from response".to_owned())),
            (false, _) => Err(ApiError::from_envelope(env.error)),
        }
    }

    /// `GET /api/reviews?type=learning&status=AWAITING_APPROVAL`.
    pub async fn fetch_learning_proposals(&self) -> Result<Vec<LearningProposal>, ApiError> {
        let env: LearningEnvelope = self
            .http
            .get(self.reviews_url())
            .query(&[("type", "learning"), ("status", "AWAITING_APPROVAL")])
            .send()
            .await?
            .json()
            .await?;
        if env.success {
            Ok(env.learning_proposals)
        } else {
            Err(ApiError::from_envelope(env.error))
        }
    }

    /// `POST /api/reviews` with a single approve/reject/feedback decision.
    pub async fn post_decision(
        &self,
        id: &str,
        decision: Decision,
        message: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = DecisionBody { approval_request_id: id, decision, message };
        let env: DecisionEnvelope = self
            .http
            .post(self.reviews_url())
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        if env.success {
            Ok(())
        } else {
            Err(ApiError::from_envelope(env.error))
        }
    }

    /// `POST /api/reviews` approving every id in one request. The server's
    /// aggregate counts come back verbatim even on partial failure.
    pub async fn post_batch_approve(&self, ids: &[String]) -> Result<BatchOutcome, ApiError> {
        let body = BatchBody {
            items: ids
                .iter()
                .map(|id| BatchItem { approval_request_id: id, decision: Decision::Approved })
                .collect(),
        };
        let env: BatchEnvelope = self
            .http
            .post(self.reviews_url())
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        if env.success {
            Ok(BatchOutcome { success_count: env.success_count, total_count: env.total_count })
        } else {
            Err(ApiError::from_envelope(env.error))
        }
    }

    /// `POST /api/reviews` deciding a learning proposal by session id.
    pub async fn post_learning_decision(
        &self,
        session_id: &str,
        decision: LearningDecision,
    ) -> Result<(), ApiError> {
        let body = LearningBody { r#type: "learning", session_id, decision };
        let env: DecisionEnvelope = self
            .http
            .post(self.reviews_url())
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        if env.success {
            Ok(())
        } else {
            Err(ApiError::from_envelope(env.error))
        }
    }
}
