use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::orders::{
        AddressInput, AddressView, CreateOrderRequest, OrderItemInput, OrderItemView,
        OrderResponse, ShipmentView,
    },
    models::{Order, OrderAddress, OrderItem, Shipment},
    routes::{health, orders},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        orders::create_order,
        orders::get_order,
        orders::list_orders_by_user,
        orders::update_order_status,
        orders::cancel_order,
        orders::list_all_orders,
    ),
    components(
        schemas(
            Order,
            OrderItem,
            OrderAddress,
            Shipment,
            CreateOrderRequest,
            AddressInput,
            OrderItemInput,
            OrderResponse,
            AddressView,
            OrderItemView,
            ShipmentView,
            health::HealthData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Orders", description = "Order management endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
