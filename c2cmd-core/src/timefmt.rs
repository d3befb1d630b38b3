//! Relative-time labels and age-based urgency buckets for queue rows.

use chrono::{DateTime, Duration, Utc};

/// How overdue an item's decision is, judged purely by age. Maps to a label
/// color in the TUI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Under 15 minutes old.
    Fresh,
    /// 15 minutes to an hour.
    Aging,
    /// One to four hours.
    Stale,
    /// Over four hours — someone forgot this one.
    Overdue,
}

/// Buckets an item age into an [`Urgency`].
pub fn urgency(age: Duration) -> Urgency {
    if age < Duration::minutes(15) {
        Urgency::Fresh
    } else if age < Duration::hours(1) {
        Urgency::Aging
    } else if age < Duration::hours(4) {
        Urgency::Stale
    } else {
        Urgency::Overdue
    }
}

/// Compact "time ago" label: `just now`, `5m ago`, `3h ago`, `2d ago`.
///
/// Clock skew (a `created_at` in the future) reads as `just now` rather than
/// producing a negative label.
pub fn relative(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now - created_at;
    if age < Duration::minutes(1) {
        "just now".to_owned()
    } else if age < Duration::hours(1) {
        format!("{}m ago", age.num_minutes())
    } else if age < Duration::days(1) {
        format!("{}h ago", age.num_hours())
    } else {
        format!("{}d ago", age.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn labels_scale_with_age() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        assert_eq!(relative(now - Duration::seconds(20), now), "just now");
        assert_eq!(relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        assert_eq!(relative(now + Duration::minutes(5), now), "just now");
    }

    #[test]
    fn urgency_buckets() {
        assert_eq!(urgency(Duration::minutes(2)), Urgency::Fresh);
        assert_eq!(urgency(Duration::minutes(30)), Urgency::Aging);
        assert_eq!(urgency(Duration::hours(2)), Urgency::Stale);
        assert_eq!(urgency(Duration::hours(9)), Urgency::Overdue);
    }
}
