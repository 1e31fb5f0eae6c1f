//! Promotional pricing and inventory limits

pub mod pricing;
pub mod service;
pub mod status;
pub mod validate;
pub mod wallclock;
pub mod working_set;

pub use pricing::{PricePair, round2};
pub use service::DiscountService;
pub use status::{DiscountBucket, effective_status, filter_bucket, in_bucket};
pub use validate::DiscountDraft;
pub use wallclock::{local_to_utc, utc_to_local};
pub use working_set::{BatchUpdate, LimitMode, WorkingEntry, WorkingSet};
