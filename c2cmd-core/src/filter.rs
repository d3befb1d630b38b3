//! Facet filtering and ordering for the review queue.
//!
//! Two independent facets — workflow slug and risk level — each either `All`
//! (None) or a specific value, combined with logical AND. The filtered and
//! ordered list produced here is the sole basis for keyboard navigation
//! indices, so ordering must be deterministic: risk severity descending, then
//! oldest first within a severity band.

use crate::types::{ReviewItem, RiskLevel};

/// Active facet selection. `None` on a facet means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub workflow: Option<String>,
    pub risk: Option<RiskLevel>,
}

impl ReviewFilter {
    /// True when neither facet is narrowing the list.
    pub fn is_unfiltered(&self) -> bool {
        self.workflow.is_none() && self.risk.is_none()
    }

    /// AND of both facets against a single item.
    pub fn matches(&self, item: &ReviewItem) -> bool {
        let workflow_ok = match &self.workflow {
            None => true,
            Some(slug) => item.workflow_slug.as_deref() == Some(slug.as_str()),
        };
        let risk_ok = match self.risk {
            None => true,
            Some(level) => item.risk_level == level,
        };
        workflow_ok && risk_ok
    }

    /// Advances the workflow facet through `All → facets[0] → … → All`.
    ///
    /// `facets` is the sorted distinct slug list from [`workflow_facets`].
    /// A stale selection (slug no longer present) wraps back to `All`.
    pub fn cycle_workflow(&mut self, facets: &[String]) {
        self.workflow = match self.workflow.take() {
            None => facets.first().cloned(),
            Some(current) => match facets.iter().position(|s| *s == current) {
                Some(idx) => facets.get(idx + 1).cloned(),
                None => None,
            },
        };
    }

    /// Advances the risk facet through `All → Critical → High → … → Trivial → All`.
    pub fn cycle_risk(&mut self) {
        self.risk = match self.risk {
            None => Some(RiskLevel::Critical),
            Some(RiskLevel::Critical) => Some(RiskLevel::High),
            Some(RiskLevel::High) => Some(RiskLevel::Medium),
            Some(RiskLevel::Medium) => Some(RiskLevel::Low),
            Some(RiskLevel::Low) => Some(RiskLevel::Trivial),
            Some(RiskLevel::Trivial) | Some(RiskLevel::Unknown) => None,
        };
    }
}

/// Applies the filter and urgency ordering, returning references into `items`.
///
/// Ordering: risk severity descending, then `created_at` ascending (the oldest
/// item within a band has waited longest and sorts first). The sort is stable,
/// so equal keys keep their fetch order.
pub fn visible<'a>(items: &'a [ReviewItem], filter: &ReviewFilter) -> Vec<&'a ReviewItem> {
    let mut out: Vec<&ReviewItem> = items.iter().filter(|i| filter.matches(i)).collect();
    out.sort_by(|a, b| {
        b.risk_level
            .cmp(&a.risk_level)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    out
}

/// Sorted, de-duplicated workflow slugs present in `items` — the cycle order
/// for the workflow facet.
pub fn workflow_facets(items: &[ReviewItem]) -> Vec<String> {
    let mut slugs: Vec<String> = items
        .iter()
        .filter_map(|i| i.workflow_slug.clone())
        .collect();
    slugs.sort();
    slugs.dedup();
    slugs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReviewContext, ReviewStatus};
    use chrono::{TimeZone, Utc};

    fn item(id: &str, slug: Option<&str>, risk: RiskLevel, minute: u32) -> ReviewItem {
        ReviewItem {
            id: id.to_owned(),
            status: ReviewStatus::Pending,
            workflow_slug: slug.map(str::to_owned),
            workflow_name: None,
            risk_level: risk,
            review_context: ReviewContext::default(),
            notified_channels: Vec::new(),
            feedback_round: 1,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn facets_combine_with_and() {
        let items = vec![
            item("a", Some("trip"), RiskLevel::High, 0),
            item("b", Some("trip"), RiskLevel::Low, 1),
            item("c", Some("billing"), RiskLevel::High, 2),
        ];
        let filter = ReviewFilter {
            workflow: Some("trip".to_owned()),
            risk: Some(RiskLevel::High),
        };
        let view = visible(&items, &filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "a");
    }

    #[test]
    fn orders_by_risk_then_age() {
        let items = vec![
            item("old-low", None, RiskLevel::Low, 0),
            item("new-crit", None, RiskLevel::Critical, 30),
            item("old-crit", None, RiskLevel::Critical, 10),
        ];
        let view = visible(&items, &ReviewFilter::default());
        let ids: Vec<&str> = view.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["old-crit", "new-crit", "old-low"]);
    }

    #[test]
    fn workflow_cycle_wraps_to_all() {
        let facets = vec!["billing".to_owned(), "trip".to_owned()];
        let mut filter = ReviewFilter::default();
        filter.cycle_workflow(&facets);
        assert_eq!(filter.workflow.as_deref(), Some("billing"));
        filter.cycle_workflow(&facets);
        assert_eq!(filter.workflow.as_deref(), Some("trip"));
        filter.cycle_workflow(&facets);
        assert_eq!(filter.workflow, None);
    }

    #[test]
    fn stale_workflow_selection_resets_to_all() {
        let mut filter = ReviewFilter {
            workflow: Some("gone".to_owned()),
            risk: None,
        };
        filter.cycle_workflow(&["trip".to_owned()]);
        assert_eq!(filter.workflow, None);
    }

    #[test]
    fn risk_cycle_runs_severity_descending() {
        let mut filter = ReviewFilter::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            filter.cycle_risk();
            seen.push(filter.risk);
        }
        assert_eq!(
            seen,
            vec![
                Some(RiskLevel::Critical),
                Some(RiskLevel::High),
                Some(RiskLevel::Medium),
                Some(RiskLevel::Low),
                Some(RiskLevel::Trivial),
                None,
            ]
        );
    }

    #[test]
    fn facet_list_is_sorted_and_distinct() {
        let items = vec![
            item("a", Some("trip"), RiskLevel::Low, 0),
            item("b", Some("billing"), RiskLevel::Low, 1),
            item("c", Some("trip"), RiskLevel::Low, 2),
            item("d", None, RiskLevel::Low, 3),
        ];
        assert_eq!(workflow_facets(&items), vec!["billing", "trip"]);
    }
}
