use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Well-known order statuses. `update_status` deliberately accepts any
/// non-blank string, so the column stays a plain string rather than an enum.
pub mod order_status {
    pub const PENDING: &str = "PENDING";
    pub const PREPARING: &str = "PREPARING";
    pub const SHIPPED: &str = "SHIPPED";
    pub const DELIVERED: &str = "DELIVERED";
    pub const CANCELLED: &str = "CANCELLED";
}

pub mod shipment_status {
    pub const PREPARING: &str = "PREPARING";
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
    pub shipping_address_id: Uuid,
    pub billing_address_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price captured from the catalog at creation time; never re-read.
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderAddress {
    pub id: Uuid,
    pub street: String,
    pub number: String,
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shipment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub shipping_date: DateTime<Utc>,
    pub tracking_number: String,
    pub carrier: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
