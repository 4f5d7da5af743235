use async_trait::async_trait;
use sea_orm::DbErr;
use uuid::Uuid;

use crate::models::{Order, OrderAddress, OrderItem, Shipment};

pub mod orm;

pub use orm::{
    OrmOrderAddressRepository, OrmOrderItemRepository, OrmOrderRepository, OrmShipmentRepository,
};

// Narrow persistence ports. No business logic lives here; each method is a
// single-entity pass-through backed by one concrete adapter.

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: Order) -> Result<Order, DbErr>;
    async fn update(&self, order: Order) -> Result<Order, DbErr>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DbErr>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Order>, DbErr>;
    async fn find_all(&self) -> Result<Vec<Order>, DbErr>;
}

#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    async fn insert_many(&self, items: Vec<OrderItem>) -> Result<Vec<OrderItem>, DbErr>;
    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<OrderItem>, DbErr>;
}

#[async_trait]
pub trait OrderAddressRepository: Send + Sync {
    async fn insert(&self, address: OrderAddress) -> Result<OrderAddress, DbErr>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderAddress>, DbErr>;
}

#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    async fn insert(&self, shipment: Shipment) -> Result<Shipment, DbErr>;
    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<Shipment>, DbErr>;
}
