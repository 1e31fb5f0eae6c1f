//! Effective discount status and filter buckets
//!
//! A discount's availability is a function of its stored status and its
//! datetime window at the current instant. Nothing here is stored or
//! cached; every read recomputes against the `now` it is given, because
//! the answer changes with the passage of time alone.

use chrono::{DateTime, Utc};
use shared::models::{Discount, DiscountStatus};

/// Stored status overridden by the datetime window
///
/// A discount whose `end_datetime` has passed is `expired` regardless of
/// what the stored status says.
pub fn effective_status(discount: &Discount, now: DateTime<Utc>) -> DiscountStatus {
    if expired_by_date(discount, now) {
        DiscountStatus::Expired
    } else {
        discount.status
    }
}

fn expired_by_date(discount: &Discount, now: DateTime<Utc>) -> bool {
    discount.end_datetime.is_some_and(|end| end < now)
}

/// Derived filter buckets for discount listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountBucket {
    All,
    Ongoing,
    Scheduled,
    Expired,
    Inactive,
}

/// Whether a discount falls in `bucket` at instant `now`
pub fn in_bucket(discount: &Discount, bucket: DiscountBucket, now: DateTime<Utc>) -> bool {
    let expired = expired_by_date(discount, now) || discount.status == DiscountStatus::Expired;
    match bucket {
        DiscountBucket::All => true,
        DiscountBucket::Expired => expired,
        DiscountBucket::Ongoing => {
            !expired
                && discount.status == DiscountStatus::Active
                && discount.start_datetime <= now
                && discount.end_datetime.is_none_or(|end| end >= now)
        }
        DiscountBucket::Scheduled => {
            !expired
                && discount.status == DiscountStatus::Active
                && discount.start_datetime > now
        }
        DiscountBucket::Inactive => {
            !expired
                && matches!(
                    discount.status,
                    DiscountStatus::Inactive | DiscountStatus::Paused
                )
        }
    }
}

/// Filter a listing down to one bucket, preserving order
pub fn filter_bucket<'a>(
    discounts: &'a [Discount],
    bucket: DiscountBucket,
    now: DateTime<Utc>,
) -> Vec<&'a Discount> {
    discounts
        .iter()
        .filter(|d| in_bucket(d, bucket, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 19, 12, 0, 0).unwrap()
    }

    fn discount(
        status: DiscountStatus,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Discount {
        Discount {
            id: "disc-1".to_string(),
            business_id: "biz-1".to_string(),
            name: "Autumn sale".to_string(),
            description: None,
            start_datetime: start,
            end_datetime: end,
            status,
            applicable_products: vec![],
        }
    }

    #[test]
    fn test_past_end_date_overrides_stored_status() {
        let d = discount(
            DiscountStatus::Active,
            now() - Duration::days(7),
            Some(now() - Duration::days(1)),
        );
        assert_eq!(effective_status(&d, now()), DiscountStatus::Expired);
        assert!(in_bucket(&d, DiscountBucket::Expired, now()));
        assert!(!in_bucket(&d, DiscountBucket::Ongoing, now()));
    }

    #[test]
    fn test_open_ended_active_is_ongoing() {
        let d = discount(DiscountStatus::Active, now() - Duration::days(1), None);
        assert_eq!(effective_status(&d, now()), DiscountStatus::Active);
        assert!(in_bucket(&d, DiscountBucket::Ongoing, now()));
    }

    #[test]
    fn test_future_start_is_scheduled_not_ongoing() {
        let d = discount(
            DiscountStatus::Active,
            now() + Duration::days(1),
            Some(now() + Duration::days(7)),
        );
        assert!(in_bucket(&d, DiscountBucket::Scheduled, now()));
        assert!(!in_bucket(&d, DiscountBucket::Ongoing, now()));
    }

    #[test]
    fn test_paused_and_inactive_bucket_together() {
        for status in [DiscountStatus::Paused, DiscountStatus::Inactive] {
            let d = discount(status, now() - Duration::days(1), None);
            assert!(in_bucket(&d, DiscountBucket::Inactive, now()));
            assert!(!in_bucket(&d, DiscountBucket::Ongoing, now()));
        }
    }

    #[test]
    fn test_stored_expired_buckets_as_expired() {
        let d = discount(DiscountStatus::Expired, now() - Duration::days(1), None);
        assert!(in_bucket(&d, DiscountBucket::Expired, now()));
        assert!(!in_bucket(&d, DiscountBucket::Inactive, now()));
    }

    #[test]
    fn test_all_bucket_matches_everything() {
        let d = discount(
            DiscountStatus::Paused,
            now() - Duration::days(1),
            Some(now() - Duration::hours(1)),
        );
        assert!(in_bucket(&d, DiscountBucket::All, now()));
    }

    #[test]
    fn test_bucketing_moves_with_the_clock() {
        let d = discount(
            DiscountStatus::Active,
            now() - Duration::days(1),
            Some(now() + Duration::hours(1)),
        );
        assert!(in_bucket(&d, DiscountBucket::Ongoing, now()));
        // Two hours later the same record is expired
        assert!(in_bucket(&d, DiscountBucket::Expired, now() + Duration::hours(2)));
    }

    #[test]
    fn test_filter_preserves_order() {
        let a = discount(DiscountStatus::Active, now() - Duration::days(1), None);
        let mut b = a.clone();
        b.id = "disc-2".to_string();
        let discounts = [a, b];
        let filtered = filter_bucket(&discounts, DiscountBucket::Ongoing, now());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "disc-1");
    }
}
