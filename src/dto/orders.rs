use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{OrderAddress, OrderItem, Shipment};

// Wire field names are camelCase for compatibility with existing consumers
// of the order service.

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub shipping_address: AddressInput,
    pub billing_address: AddressInput,
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
    pub user_id: Uuid,
    pub shipping_address: AddressView,
    pub billing_address: AddressView,
    pub items: Vec<OrderItemView>,
    pub shipment: ShipmentView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address as seen on an order view. A missing address row is rendered as a
/// structurally present record with all fields null, not as an absent field.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressView {
    pub id: Option<Uuid>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub apartment: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OrderAddress> for AddressView {
    fn from(address: OrderAddress) -> Self {
        Self {
            id: Some(address.id),
            street: Some(address.street),
            number: Some(address.number),
            apartment: address.apartment,
            city: Some(address.city),
            state: Some(address.state),
            country: Some(address.country),
            postal_code: Some(address.postal_code),
            created_at: Some(address.created_at),
            updated_at: Some(address.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderItemView {
    pub fn new(item: &OrderItem, product_name: String) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// Shipment as seen on an order view; same placeholder convention as
/// [`AddressView`].
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentView {
    pub id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub shipping_date: Option<DateTime<Utc>>,
    pub tracking_number: Option<String>,
    pub carrier: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Shipment> for ShipmentView {
    fn from(shipment: Shipment) -> Self {
        Self {
            id: Some(shipment.id),
            order_id: Some(shipment.order_id),
            shipping_date: Some(shipment.shipping_date),
            tracking_number: Some(shipment.tracking_number),
            carrier: shipment.carrier,
            status: Some(shipment.status),
            created_at: Some(shipment.created_at),
            updated_at: Some(shipment.updated_at),
        }
    }
}
