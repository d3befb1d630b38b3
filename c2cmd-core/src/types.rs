//! Wire-shaped domain types for the AgentC2 review API.
//!
//! All types deserialize directly from the `/api/reviews` JSON surface, which
//! uses camelCase field names. Fields the server may omit carry
//! `#[serde(default)]` so a sparse payload never fails the whole fetch.
//! The design intentionally avoids borrowed lifetimes so fetched data can be
//! stored in app state and sent across task boundaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side lifecycle state of a review item.
///
/// Only `Pending` is actionable from the console; the others are terminal
/// display states for the fetch they arrived in. A `Feedback` item re-enters
/// the pending pool server-side with `feedback_round` incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Feedback,
}

/// Status facet for list fetches — `ReviewStatus` plus the `all` pseudo-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Approved,
    Rejected,
    Feedback,
}

impl StatusFilter {
    /// Query-string value for `GET /api/reviews?status=…`.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Approved => "approved",
            StatusFilter::Rejected => "rejected",
            StatusFilter::Feedback => "feedback",
        }
    }
}

/// Coarse severity tag attached to a pending review.
///
/// Variant order is ascending urgency so `Ord` can drive the queue sort.
/// Unrecognized wire values land on `Unknown` instead of failing the fetch,
/// hence the `From<String>` deserialization route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RiskLevel {
    #[default]
    Unknown,
    Trivial,
    Low,
    Medium,
    High,
    Critical,
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "trivial" => RiskLevel::Trivial,
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            "critical" => RiskLevel::Critical,
            _ => RiskLevel::Unknown,
        }
    }
}

impl RiskLevel {
    /// True for the levels that warrant an attention notification.
    pub fn is_alerting(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    /// Short uppercase badge label for list rows.
    pub fn badge(self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRIT",
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MED ",
            RiskLevel::Low => "LOW ",
            RiskLevel::Trivial => "TRIV",
            RiskLevel::Unknown => "??? ",
        }
    }
}

/// Free-form descriptive payload attached to a review.
///
/// Opaque to the state machines — only the renderer looks inside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewContext {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub suggested_prompt: Option<String>,
}

/// One unit of work awaiting a human decision.
///
/// `id` is opaque and stable across polls; it is the sole key linking server
/// data to session state. Once `status` leaves `Pending` the item is expected
/// to vanish from the pending view on the next fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: String,
    pub status: ReviewStatus,
    #[serde(default)]
    pub workflow_slug: Option<String>,
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub review_context: ReviewContext,
    #[serde(default)]
    pub notified_channels: Vec<String>,
    #[serde(default = "first_round")]
    pub feedback_round: u32,
    pub created_at: DateTime<Utc>,
}

fn first_round() -> u32 {
    1
}

impl ReviewItem {
    /// Human-readable workflow label: display name, else slug, else a stub.
    pub fn workflow_label(&self) -> &str {
        self.workflow_name
            .as_deref()
            .or(self.workflow_slug.as_deref())
            .unwrap_or("unnamed workflow")
    }
}

/// Operator decision for a single review item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
    Feedback,
}

/// Operator decision for a learning proposal. The learning endpoint uses the
/// imperative spelling, unlike the review endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningDecision {
    Approve,
    Reject,
}

/// Experiment summary attached to a learning proposal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub gate_passed: bool,
}

/// Approval bookkeeping attached to a learning proposal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalInfo {
    #[serde(default)]
    pub requested_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub requested_by: Option<String>,
}

/// Pending promotion of an agent's learned configuration.
///
/// Structurally parallel to `ReviewItem` but fetched and decided through a
/// separate flow, keyed by `session_id` rather than a review id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProposal {
    pub session_id: String,
    #[serde(default)]
    pub agent_slug: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub experiment: Experiment,
    #[serde(default)]
    pub approval: ApprovalInfo,
}

impl LearningProposal {
    /// Display label for list rows.
    pub fn label(&self) -> &str {
        self.agent_slug.as_deref().unwrap_or("unnamed agent")
    }
}

/// Direction of the queue-depth trend in the metrics strip. Anything the
/// server sends beyond up/down reads as flat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum QueueTrend {
    Up,
    Down,
    #[default]
    Flat,
}

impl From<String> for QueueTrend {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "up" => QueueTrend::Up,
            "down" => QueueTrend::Down,
            _ => QueueTrend::Flat,
        }
    }
}

impl QueueTrend {
    pub fn arrow(self) -> &'static str {
        match self {
            QueueTrend::Up => "↑",
            QueueTrend::Down => "↓",
            QueueTrend::Flat => "→",
        }
    }
}

/// Aggregate counters recomputed server-side. Advisory only — a failed
/// metrics fetch never blocks or degrades the queue itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub pending_count: u64,
    #[serde(default)]
    pub avg_wait_minutes: f64,
    #[serde(default, rename = "approvalRate7d")]
    pub approval_rate_7d: f64,
    #[serde(default)]
    pub decisions_today: u64,
    #[serde(default)]
    pub avg_decision_minutes: f64,
    #[serde(default, rename = "resolved24h")]
    pub resolved_24h: u64,
    #[serde(default)]
    pub queue_trend: QueueTrend,
}

/// Aggregate result of a batch-approve request. The server's counts are
/// authoritative and surfaced verbatim; the client does not decompose which
/// ids failed within a partial batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub success_count: u64,
    pub total_count: u64,
}

impl BatchOutcome {
    /// True when every item in the batch was applied.
    pub fn complete(self) -> bool {
        self.success_count == self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_item_deserializes_camel_case_with_defaults() {
        let raw = r#"{
            "id": "rev-1",
            "status": "pending",
            "workflowSlug": "trip-planner",
            "workflowName": "Trip Planner",
            "riskLevel": "high",
            "reviewContext": {"summary": "Book flights", "files": ["plan.md"]},
            "notifiedChannels": ["slack"],
            "feedbackRound": 2,
            "createdAt": "2026-08-01T12:00:00Z"
        }"#;
        let item: ReviewItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id, "rev-1");
        assert_eq!(item.status, ReviewStatus::Pending);
        assert_eq!(item.risk_level, RiskLevel::High);
        assert_eq!(item.feedback_round, 2);
        assert_eq!(item.workflow_label(), "Trip Planner");
        assert_eq!(item.review_context.files, vec!["plan.md"]);
    }

    #[test]
    fn sparse_review_item_fills_defaults() {
        let raw = r#"{"id": "rev-2", "status": "pending", "createdAt": "2026-08-01T12:00:00Z"}"#;
        let item: ReviewItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.risk_level, RiskLevel::Unknown);
        assert_eq!(item.feedback_round, 1);
        assert_eq!(item.workflow_label(), "unnamed workflow");
        assert!(item.notified_channels.is_empty());
    }

    #[test]
    fn unrecognized_risk_level_maps_to_unknown() {
        let raw = r#"{"id": "r", "status": "pending", "riskLevel": "catastrophic",
                      "createdAt": "2026-08-01T12:00:00Z"}"#;
        let item: ReviewItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn risk_levels_order_by_urgency() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Trivial > RiskLevel::Unknown);
        assert!(RiskLevel::Critical.is_alerting());
        assert!(RiskLevel::High.is_alerting());
        assert!(!RiskLevel::Medium.is_alerting());
    }

    #[test]
    fn metrics_snapshot_reads_numbered_fields() {
        let raw = r#"{"pendingCount": 4, "approvalRate7d": 0.85, "resolved24h": 12,
                      "queueTrend": "up"}"#;
        let m: MetricsSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(m.pending_count, 4);
        assert_eq!(m.resolved_24h, 12);
        assert_eq!(m.queue_trend, QueueTrend::Up);
        assert!((m.approval_rate_7d - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn decision_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Decision::Approved).unwrap(), "\"approved\"");
        assert_eq!(serde_json::to_string(&LearningDecision::Approve).unwrap(), "\"approve\"");
    }
}
