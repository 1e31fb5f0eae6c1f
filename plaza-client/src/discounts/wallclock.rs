//! Local wall-clock <-> UTC conversion
//!
//! Discount windows are entered and displayed as local wall-clock but
//! persisted as UTC instants. The conversion uses the offset in effect at
//! the specific instant, never a cached offset, so the round trip recovers
//! the entered wall-clock value across daylight-saving boundaries.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};

/// Convert an operator-entered wall-clock value to the UTC instant to
/// persist
///
/// A wall-clock value that falls inside a daylight-saving gap does not
/// exist in that timezone; `None` is returned so the caller can reject the
/// input instead of guessing. An ambiguous value (clocks rolled back)
/// resolves to the earlier instant.
pub fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) => Some(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Convert a persisted UTC instant back to local wall-clock for re-editing
pub fn utc_to_local<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(tz).naive_local()
}
