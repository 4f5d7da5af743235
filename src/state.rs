use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::gateway::{HttpProductGateway, HttpUserGateway, ProductGateway, UserGateway};
use crate::repository::{
    OrderAddressRepository, OrderItemRepository, OrderRepository, OrmOrderAddressRepository,
    OrmOrderItemRepository, OrmOrderRepository, OrmShipmentRepository, ShipmentRepository,
};

/// Shared handles behind every request: the four persistence ports and the
/// two outbound gateways. Everything is a trait object so tests can swap in
/// in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
    pub order_items: Arc<dyn OrderItemRepository>,
    pub addresses: Arc<dyn OrderAddressRepository>,
    pub shipments: Arc<dyn ShipmentRepository>,
    pub users: Arc<dyn UserGateway>,
    pub products: Arc<dyn ProductGateway>,
}

impl AppState {
    /// Wire the production adapters: sea-orm repositories over `conn` and
    /// reqwest gateways configured from `config`.
    pub fn new(conn: DatabaseConnection, config: &AppConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            orders: Arc::new(OrmOrderRepository::new(conn.clone())),
            order_items: Arc::new(OrmOrderItemRepository::new(conn.clone())),
            addresses: Arc::new(OrmOrderAddressRepository::new(conn.clone())),
            shipments: Arc::new(OrmShipmentRepository::new(conn)),
            users: Arc::new(HttpUserGateway::new(
                client.clone(),
                config.user_service.clone(),
                config.gateway_retry.clone(),
            )),
            products: Arc::new(HttpProductGateway::new(
                client,
                config.product_service.clone(),
                config.gateway_retry.clone(),
            )),
        }
    }
}
