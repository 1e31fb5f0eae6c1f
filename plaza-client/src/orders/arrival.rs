//! Arrival verification
//!
//! Resolves an opaque pickup code to an order within a business and drives
//! its terminal transition. A code that matches nothing is a lookup outcome,
//! not a transition error.

/// Fixed length of an arrival code
pub const ARRIVAL_CODE_LEN: usize = 6;

/// Outcome of an arrival verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrivalOutcome {
    /// The code resolved to an order, which was transitioned to picked up
    Verified { order_number: String },
    /// No order in this business matches the code
    NotFound,
}

/// Normalize an operator-entered code: trim surrounding whitespace and
/// uppercase, matching how codes are issued.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Whether a normalized code has the expected shape
pub fn is_plausible_code(code: &str) -> bool {
    code.len() == ARRIVAL_CODE_LEN && code.chars().all(|c| c.is_ascii_alphanumeric())
}
