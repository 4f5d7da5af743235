#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use uuid::Uuid;

use order_management_api::dto::orders::{AddressInput, CreateOrderRequest, OrderItemInput};
use order_management_api::gateway::{
    GatewayError, ProductDetails, ProductGateway, UserDetails, UserGateway,
};
use order_management_api::models::{Order, OrderAddress, OrderItem, Shipment};
use order_management_api::repository::{
    OrderAddressRepository, OrderItemRepository, OrderRepository, ShipmentRepository,
};
use order_management_api::state::AppState;

// In-memory doubles for the persistence ports and gateways. Call counters
// let tests assert not just outcomes but which collaborators were touched.

#[derive(Default)]
pub struct MockUserGateway {
    pub known_users: Mutex<HashSet<Uuid>>,
    pub exists_calls: AtomicUsize,
}

#[async_trait]
impl UserGateway for MockUserGateway {
    async fn exists(&self, user_id: Uuid) -> bool {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.known_users.lock().unwrap().contains(&user_id)
    }

    async fn details(&self, _user_id: Uuid) -> Option<UserDetails> {
        None
    }
}

#[derive(Default)]
pub struct MockProductGateway {
    pub catalog: Mutex<HashMap<Uuid, ProductDetails>>,
    pub available: Mutex<HashMap<Uuid, bool>>,
    pub details_calls: AtomicUsize,
    pub check_calls: AtomicUsize,
    pub decrease_log: Mutex<Vec<(Uuid, i32)>>,
    pub increase_log: Mutex<Vec<(Uuid, i32)>>,
}

impl MockProductGateway {
    pub fn add_product(&self, id: Uuid, price: Decimal, name: &str, in_stock: bool) {
        self.catalog.lock().unwrap().insert(
            id,
            ProductDetails {
                product_id: id,
                name: name.to_string(),
                description: None,
                price,
                stock: if in_stock { 100 } else { 0 },
            },
        );
        self.available.lock().unwrap().insert(id, in_stock);
    }

    pub fn remove_product(&self, id: &Uuid) {
        self.catalog.lock().unwrap().remove(id);
    }

    pub fn product_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst) + self.check_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductGateway for MockProductGateway {
    async fn details(&self, product_id: Uuid) -> Result<ProductDetails, GatewayError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("Product not found: {product_id}")))
    }

    async fn check_stock(&self, product_id: Uuid, _quantity: i32) -> Result<bool, GatewayError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        Ok(*self
            .available
            .lock()
            .unwrap()
            .get(&product_id)
            .unwrap_or(&false))
    }

    async fn decrease_stock(&self, product_id: Uuid, quantity: i32) -> Result<(), GatewayError> {
        self.decrease_log.lock().unwrap().push((product_id, quantity));
        Ok(())
    }

    async fn increase_stock(&self, product_id: Uuid, quantity: i32) -> Result<(), GatewayError> {
        self.increase_log.lock().unwrap().push((product_id, quantity));
        Ok(())
    }
}

#[derive(Default)]
pub struct MockOrderRepository {
    pub rows: Mutex<HashMap<Uuid, Order>>,
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn insert(&self, order: Order) -> Result<Order, DbErr> {
        self.rows.lock().unwrap().insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<Order, DbErr> {
        self.rows.lock().unwrap().insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DbErr> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Order>, DbErr> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Order>, DbErr> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct MockOrderItemRepository {
    pub rows: Mutex<Vec<OrderItem>>,
}

#[async_trait]
impl OrderItemRepository for MockOrderItemRepository {
    async fn insert_many(&self, items: Vec<OrderItem>) -> Result<Vec<OrderItem>, DbErr> {
        self.rows.lock().unwrap().extend(items.iter().cloned());
        Ok(items)
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Vec<OrderItem>, DbErr> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockOrderAddressRepository {
    pub rows: Mutex<HashMap<Uuid, OrderAddress>>,
}

#[async_trait]
impl OrderAddressRepository for MockOrderAddressRepository {
    async fn insert(&self, address: OrderAddress) -> Result<OrderAddress, DbErr> {
        self.rows
            .lock()
            .unwrap()
            .insert(address.id, address.clone());
        Ok(address)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderAddress>, DbErr> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct MockShipmentRepository {
    pub rows: Mutex<Vec<Shipment>>,
}

#[async_trait]
impl ShipmentRepository for MockShipmentRepository {
    async fn insert(&self, shipment: Shipment) -> Result<Shipment, DbErr> {
        self.rows.lock().unwrap().push(shipment.clone());
        Ok(shipment)
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> Result<Option<Shipment>, DbErr> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.order_id == order_id)
            .cloned())
    }
}

/// An AppState wired entirely to in-memory doubles, with typed handles kept
/// alongside for assertions.
pub struct TestEnv {
    pub state: AppState,
    pub users: Arc<MockUserGateway>,
    pub products: Arc<MockProductGateway>,
    pub orders: Arc<MockOrderRepository>,
    pub order_items: Arc<MockOrderItemRepository>,
    pub addresses: Arc<MockOrderAddressRepository>,
    pub shipments: Arc<MockShipmentRepository>,
}

impl TestEnv {
    pub fn new() -> Self {
        let users = Arc::new(MockUserGateway::default());
        let products = Arc::new(MockProductGateway::default());
        let orders = Arc::new(MockOrderRepository::default());
        let order_items = Arc::new(MockOrderItemRepository::default());
        let addresses = Arc::new(MockOrderAddressRepository::default());
        let shipments = Arc::new(MockShipmentRepository::default());

        let state = AppState {
            orders: orders.clone(),
            order_items: order_items.clone(),
            addresses: addresses.clone(),
            shipments: shipments.clone(),
            users: users.clone(),
            products: products.clone(),
        };

        Self {
            state,
            users,
            products,
            orders,
            order_items,
            addresses,
            shipments,
        }
    }

    pub fn known_user(&self) -> Uuid {
        let user_id = Uuid::new_v4();
        self.users.known_users.lock().unwrap().insert(user_id);
        user_id
    }
}

pub fn address_input(street: &str) -> AddressInput {
    AddressInput {
        street: street.to_string(),
        number: "42".to_string(),
        apartment: None,
        city: "Anytown".to_string(),
        state: "CA".to_string(),
        country: "USA".to_string(),
        postal_code: "90210".to_string(),
    }
}

pub fn order_request(user_id: &str, items: Vec<(String, i32)>) -> CreateOrderRequest {
    CreateOrderRequest {
        user_id: user_id.to_string(),
        shipping_address: address_input("123 Main St"),
        billing_address: address_input("456 Other Rd"),
        items: items
            .into_iter()
            .map(|(product_id, quantity)| OrderItemInput {
                product_id,
                quantity,
            })
            .collect(),
    }
}
