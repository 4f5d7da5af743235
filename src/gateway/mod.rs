use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

pub mod error;
pub mod product;
pub mod retry;
pub mod user;

pub use error::GatewayError;
pub use product::HttpProductGateway;
pub use user::HttpUserGateway;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

/// Boundary to the user-validation service.
///
/// Both operations degrade to a safe default after the retry budget is
/// spent: callers cannot distinguish "user missing" from "user service
/// unreachable".
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn exists(&self, user_id: Uuid) -> bool;
    async fn details(&self, user_id: Uuid) -> Option<UserDetails>;
}

/// Boundary to the product-catalog service.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Fetch product details; a missing product is a distinguishable
    /// [`GatewayError::NotFound`].
    async fn details(&self, product_id: Uuid) -> Result<ProductDetails, GatewayError>;

    /// Check availability of `quantity` units. A 404 from the catalog is a
    /// normal negative answer, not an error.
    async fn check_stock(&self, product_id: Uuid, quantity: i32) -> Result<bool, GatewayError>;

    async fn decrease_stock(&self, product_id: Uuid, quantity: i32) -> Result<(), GatewayError>;

    async fn increase_stock(&self, product_id: Uuid, quantity: i32) -> Result<(), GatewayError>;
}

/// Substitute the id into a configured `{id}` path template.
pub(crate) fn render_path(template: &str, id: &Uuid) -> String {
    template.replace("{id}", &id.to_string())
}
