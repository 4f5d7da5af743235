use chrono::{Duration, Utc};
use futures::future;
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    dto::orders::{AddressInput, CreateOrderRequest, OrderItemInput, OrderItemView, OrderResponse},
    error::{AppError, AppResult},
    gateway::{GatewayError, ProductDetails},
    models::{Order, OrderAddress, OrderItem, Shipment, order_status, shipment_status},
    state::AppState,
};

/// Create an order: validate the user, resolve every item against the
/// catalog, persist addresses/order/items/shipment, then decrease stock.
///
/// Validation failures leave nothing persisted. A stock-decrease failure
/// after persistence surfaces as an error even though the rows are already
/// durable; there is no automatic rollback.
pub async fn create_order(state: &AppState, request: CreateOrderRequest) -> AppResult<OrderResponse> {
    info!(user_id = %request.user_id, "attempting to create order");

    validate_request(&request)?;

    let user_id = Uuid::parse_str(&request.user_id).map_err(|_| {
        AppError::InvalidOrderData(format!("Invalid user ID format: {}", request.user_id))
    })?;

    if !state.users.exists(user_id).await {
        return Err(AppError::UserNotFound(format!(
            "User with ID {} not found.",
            request.user_id
        )));
    }

    // Concurrent per-item fan-out; the first failing item cancels the rest.
    let resolved = future::try_join_all(
        request
            .items
            .iter()
            .map(|item| resolve_item(state, item)),
    )
    .await?;

    if resolved.is_empty() {
        return Err(AppError::InvalidOrderData(
            "Order must contain at least one valid item.".to_string(),
        ));
    }

    let total_amount: Decimal = resolved
        .iter()
        .map(|(item, details)| details.price * Decimal::from(item.quantity))
        .sum();

    let (shipping_address, billing_address) = tokio::try_join!(
        state.addresses.insert(new_address(&request.shipping_address)),
        state.addresses.insert(new_address(&request.billing_address)),
    )?;

    let now = Utc::now();
    let order = state
        .orders
        .insert(Order {
            id: Uuid::new_v4(),
            order_date: now,
            status: order_status::PENDING.to_string(),
            total_amount,
            shipping_address_id: shipping_address.id,
            billing_address_id: billing_address.id,
            user_id,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let items = resolved
        .iter()
        .map(|(item, details)| OrderItem {
            id: Uuid::new_v4(),
            order_id: order.id,
            product_id: details.product_id,
            quantity: item.quantity,
            unit_price: details.price,
            created_at: now,
            updated_at: now,
        })
        .collect();
    let persisted_items = state.order_items.insert_many(items).await?;

    state
        .shipments
        .insert(Shipment {
            id: Uuid::new_v4(),
            order_id: order.id,
            shipping_date: now + Duration::days(3),
            tracking_number: new_tracking_number(),
            carrier: None,
            status: shipment_status::PREPARING.to_string(),
            created_at: now,
            updated_at: now,
        })
        .await?;

    // Stock decreases run sequentially in the original item order; each call
    // waits for the previous one to finish.
    for item in &persisted_items {
        state
            .products
            .decrease_stock(item.product_id, item.quantity)
            .await?;
    }

    info!(order_id = %order.id, "order created");
    assemble_order_view(state, &order).await
}

pub async fn get_order_by_id(state: &AppState, order_id: &str) -> AppResult<OrderResponse> {
    info!(order_id, "fetching order");
    let id = parse_order_id(order_id)?;
    let order = state
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;
    assemble_order_view(state, &order).await
}

pub async fn get_orders_by_user(state: &AppState, user_id: &str) -> AppResult<Vec<OrderResponse>> {
    info!(user_id, "fetching orders for user");
    let id = Uuid::parse_str(user_id).map_err(|_| {
        AppError::InvalidOrderData(format!("Invalid user ID format: {user_id}"))
    })?;
    let orders = state.orders.find_by_user_id(id).await?;
    assemble_order_views(state, orders).await
}

pub async fn get_all_orders(state: &AppState) -> AppResult<Vec<OrderResponse>> {
    info!("fetching all orders");
    let orders = state.orders.find_all().await?;
    assemble_order_views(state, orders).await
}

/// Set an order's status. Beyond non-blank there is no membership check
/// against the known status set; any string is persisted as-is.
pub async fn update_order_status(
    state: &AppState,
    order_id: &str,
    new_status: &str,
) -> AppResult<OrderResponse> {
    info!(order_id, new_status, "updating order status");
    if new_status.trim().is_empty() {
        return Err(AppError::InvalidOrderData(
            "Order status cannot be blank.".to_string(),
        ));
    }
    let id = parse_order_id(order_id)?;
    let mut order = state
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

    order.status = new_status.to_string();
    order.updated_at = Utc::now();
    let order = state.orders.update(order).await?;
    assemble_order_view(state, &order).await
}

/// Cancel an order and restore its stock. A CANCELLED or DELIVERED order is
/// not cancellable; the call then succeeds as a no-op.
pub async fn cancel_order(state: &AppState, order_id: &str) -> AppResult<()> {
    info!(order_id, "attempting to cancel order");
    let id = parse_order_id(order_id)?;
    let mut order = state
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

    if order.status == order_status::CANCELLED || order.status == order_status::DELIVERED {
        warn!(order_id, status = %order.status, "order cannot be cancelled in its current status");
        return Ok(());
    }

    order.status = order_status::CANCELLED.to_string();
    order.updated_at = Utc::now();
    let order = state.orders.update(order).await?;

    // Compensating stock restoration fans out concurrently, unlike the
    // sequential decrease during creation.
    let items = state.order_items.find_by_order_id(order.id).await?;
    future::try_join_all(
        items
            .iter()
            .map(|item| state.products.increase_stock(item.product_id, item.quantity)),
    )
    .await?;

    info!(order_id, "order cancelled");
    Ok(())
}

/// Reconstruct the full order view: addresses, items and shipment are
/// fetched concurrently; a missing address or shipment row becomes an empty
/// placeholder record instead of failing the assembly.
async fn assemble_order_view(state: &AppState, order: &Order) -> AppResult<OrderResponse> {
    let (shipping_address, billing_address, items, shipment) = tokio::try_join!(
        state.addresses.find_by_id(order.shipping_address_id),
        state.addresses.find_by_id(order.billing_address_id),
        state.order_items.find_by_order_id(order.id),
        state.shipments.find_by_order_id(order.id),
    )?;

    // Product names degrade per item rather than failing the whole view.
    let item_views = future::join_all(items.iter().map(|item| async {
        let product_name = match state.products.details(item.product_id).await {
            Ok(details) => details.name,
            Err(err) => {
                error!(product_id = %item.product_id, error = %err, "could not fetch product details for item");
                "Product Name Unavailable".to_string()
            }
        };
        OrderItemView::new(item, product_name)
    }))
    .await;

    Ok(OrderResponse {
        order_id: order.id,
        order_date: order.order_date,
        status: order.status.clone(),
        total_amount: order.total_amount,
        user_id: order.user_id,
        shipping_address: shipping_address.map(Into::into).unwrap_or_default(),
        billing_address: billing_address.map(Into::into).unwrap_or_default(),
        items: item_views,
        shipment: shipment.map(Into::into).unwrap_or_default(),
        created_at: order.created_at,
        updated_at: order.updated_at,
    })
}

async fn assemble_order_views(
    state: &AppState,
    orders: Vec<Order>,
) -> AppResult<Vec<OrderResponse>> {
    future::try_join_all(orders.iter().map(|order| assemble_order_view(state, order))).await
}

/// Resolve one requested item against the catalog: parse the id, fetch the
/// price snapshot and confirm stock for the requested quantity.
async fn resolve_item<'a>(
    state: &AppState,
    item: &'a OrderItemInput,
) -> AppResult<(&'a OrderItemInput, ProductDetails)> {
    let product_id = Uuid::parse_str(&item.product_id).map_err(|_| {
        AppError::InvalidOrderData(format!("Invalid product ID format: {}", item.product_id))
    })?;

    let details = match state.products.details(product_id).await {
        Ok(details) => details,
        Err(GatewayError::NotFound(_)) => {
            return Err(AppError::InvalidOrderData(format!(
                "Product with ID {} not found.",
                item.product_id
            )));
        }
        Err(err) => return Err(err.into()),
    };

    let available = state.products.check_stock(product_id, item.quantity).await?;
    if !available {
        return Err(AppError::InsufficientStock(format!(
            "Insufficient stock for product ID: {}",
            item.product_id
        )));
    }

    Ok((item, details))
}

fn validate_request(request: &CreateOrderRequest) -> AppResult<()> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::InvalidOrderData(
            "User ID cannot be blank.".to_string(),
        ));
    }
    validate_address("shipping", &request.shipping_address)?;
    validate_address("billing", &request.billing_address)?;
    for item in &request.items {
        if item.quantity < 1 {
            return Err(AppError::InvalidOrderData(format!(
                "Quantity must be at least 1 for product {}.",
                item.product_id
            )));
        }
    }
    Ok(())
}

fn validate_address(kind: &str, address: &AddressInput) -> AppResult<()> {
    let required = [
        ("street", &address.street),
        ("number", &address.number),
        ("city", &address.city),
        ("state", &address.state),
        ("country", &address.country),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::InvalidOrderData(format!(
                "The {kind} address {field} cannot be blank."
            )));
        }
    }
    if !valid_postal_code(&address.postal_code) {
        return Err(AppError::InvalidOrderData(format!(
            "Invalid postal code format for the {kind} address."
        )));
    }
    Ok(())
}

// Accepts `12345` or `12345-6789`.
fn valid_postal_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

fn new_address(input: &AddressInput) -> OrderAddress {
    let now = Utc::now();
    OrderAddress {
        id: Uuid::new_v4(),
        street: input.street.clone(),
        number: input.number.clone(),
        apartment: input.apartment.clone(),
        city: input.city.clone(),
        state: input.state.clone(),
        country: input.country.clone(),
        postal_code: input.postal_code.clone(),
        created_at: now,
        updated_at: now,
    }
}

fn new_tracking_number() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("TRK-{}", hex[..8].to_uppercase())
}

fn parse_order_id(order_id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(order_id).map_err(|_| {
        AppError::InvalidOrderData(format!("Invalid order ID format: {order_id}"))
    })
}

fn order_not_found(order_id: &str) -> AppError {
    AppError::OrderNotFound(format!("Order with ID {order_id} not found."))
}
