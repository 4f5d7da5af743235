use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::{
    order_addresses, order_items, orders, shipments, OrderAddresses, OrderItems, Orders, Shipments,
};
use crate::models::{Order, OrderAddress, OrderItem, Shipment};

use super::{OrderAddressRepository, OrderItemRepository, OrderRepository, ShipmentRepository};

#[derive(Clone)]
pub struct OrmOrderRepository {
    conn: DatabaseConnection,
}

impl OrmOrderRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrderRepository for OrmOrderRepository {
    async fn insert(&self, order: Order) -> Result<Order, DbErr> {
        let model = order_active(&order).insert(&self.conn).await?;
        Ok(order_from_entity(model))
    }

    async fn update(&self, order: Order) -> Result<Order, DbErr> {
        let model = order_active(&order).update(&self.conn).await?;
        Ok(order_from_entity(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DbErr> {
        let model = Orders::find_by_id(id).one(&self.conn).await?;
        Ok(model.map(order_from_entity))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Order>, DbErr> {
        let models = Orders::find()
            .filter(orders::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await?;
        Ok(models.into_iter().map(order_from_entity).collect())
    }

    async fn find_all(&self) -> Result<Vec<Order>, DbErr> {
        let models = Orders::find().all(&self.conn).await?;
        Ok(models.into_iter().map(order_from_entity).collect())
    }
}

#[derive(Clone)]
pub struct OrmOrderItemRepository {
    conn: DatabaseConnection,
}

impl OrmOrderItemRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrderItemRepository for OrmOrderItemRepository {
    async fn insert_many(&self, items: Vec<OrderItem>) -> Result<Vec<OrderItem>, DbErr> {
        let mut persisted = Vec::with_capacity(items.len());
        for item in items {
            let model = order_item_active(&item).insert(&self.conn).await?;
            persisted.push(order_item_from_entity(model));
        }
        Ok(persisted)
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<OrderItem>, DbErr> {
        let models = OrderItems::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .all(&self.conn)
            .await?;
        Ok(models.into_iter().map(order_item_from_entity).collect())
    }
}

#[derive(Clone)]
pub struct OrmOrderAddressRepository {
    conn: DatabaseConnection,
}

impl OrmOrderAddressRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl OrderAddressRepository for OrmOrderAddressRepository {
    async fn insert(&self, address: OrderAddress) -> Result<OrderAddress, DbErr> {
        let model = order_addresses::ActiveModel {
            id: Set(address.id),
            street: Set(address.street),
            number: Set(address.number),
            apartment: Set(address.apartment),
            city: Set(address.city),
            state: Set(address.state),
            country: Set(address.country),
            postal_code: Set(address.postal_code),
            created_at: Set(address.created_at.into()),
            updated_at: Set(address.updated_at.into()),
        }
        .insert(&self.conn)
        .await?;
        Ok(address_from_entity(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderAddress>, DbErr> {
        let model = OrderAddresses::find_by_id(id).one(&self.conn).await?;
        Ok(model.map(address_from_entity))
    }
}

#[derive(Clone)]
pub struct OrmShipmentRepository {
    conn: DatabaseConnection,
}

impl OrmShipmentRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ShipmentRepository for OrmShipmentRepository {
    async fn insert(&self, shipment: Shipment) -> Result<Shipment, DbErr> {
        let model = shipments::ActiveModel {
            id: Set(shipment.id),
            shipping_date: Set(shipment.shipping_date.into()),
            tracking_number: Set(shipment.tracking_number),
            carrier: Set(shipment.carrier),
            status: Set(shipment.status),
            order_id: Set(shipment.order_id),
            created_at: Set(shipment.created_at.into()),
            updated_at: Set(shipment.updated_at.into()),
        }
        .insert(&self.conn)
        .await?;
        Ok(shipment_from_entity(model))
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<Shipment>, DbErr> {
        let model = Shipments::find()
            .filter(shipments::Column::OrderId.eq(order_id))
            .one(&self.conn)
            .await?;
        Ok(model.map(shipment_from_entity))
    }
}

fn order_active(order: &Order) -> orders::ActiveModel {
    orders::ActiveModel {
        id: Set(order.id),
        order_date: Set(order.order_date.into()),
        status: Set(order.status.clone()),
        total_amount: Set(order.total_amount),
        shipping_address_id: Set(order.shipping_address_id),
        billing_address_id: Set(order.billing_address_id),
        user_id: Set(order.user_id),
        created_at: Set(order.created_at.into()),
        updated_at: Set(order.updated_at.into()),
    }
}

fn order_item_active(item: &OrderItem) -> order_items::ActiveModel {
    order_items::ActiveModel {
        id: Set(item.id),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        order_id: Set(item.order_id),
        product_id: Set(item.product_id),
        created_at: Set(item.created_at.into()),
        updated_at: Set(item.updated_at.into()),
    }
}

fn order_from_entity(model: orders::Model) -> Order {
    Order {
        id: model.id,
        order_date: model.order_date.with_timezone(&Utc),
        status: model.status,
        total_amount: model.total_amount,
        shipping_address_id: model.shipping_address_id,
        billing_address_id: model.billing_address_id,
        user_id: model.user_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn order_item_from_entity(model: order_items::Model) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        unit_price: model.unit_price,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn address_from_entity(model: order_addresses::Model) -> OrderAddress {
    OrderAddress {
        id: model.id,
        street: model.street,
        number: model.number,
        apartment: model.apartment,
        city: model.city,
        state: model.state,
        country: model.country,
        postal_code: model.postal_code,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn shipment_from_entity(model: shipments::Model) -> Shipment {
    Shipment {
        id: model.id,
        order_id: model.order_id,
        shipping_date: model.shipping_date.with_timezone(&Utc),
        tracking_number: model.tracking_number,
        carrier: model.carrier,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
