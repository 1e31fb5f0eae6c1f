//! Shared test fixtures for the orders modules

use chrono::{TimeZone, Utc};
use shared::models::{Order, OrderStatus, PaymentStatus};

/// Minimal valid order for business "biz-1"; tests overwrite the fields
/// they care about.
pub fn make_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        business_id: "biz-1".to_string(),
        order_number: format!("ORD-{id}"),
        status,
        payment_status: PaymentStatus::Pending,
        arrival_code: None,
        pickup_datetime: None,
        total_amount: 25.50,
        subtotal: 25.50,
        discount_amount: 0.0,
        discount_name: None,
        item_count: 2,
        special_instructions: None,
        user_email: None,
        payment_method: None,
        created_at: Utc.with_ymd_and_hms(2025, 10, 19, 10, 0, 0).unwrap(),
    }
}
