use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    dto::orders::{CreateOrderRequest, OrderResponse},
    error::AppResult,
    services::order_service,
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    #[serde(rename = "newStatus")]
    pub new_status: String,
}

pub fn route() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_orders).post(create_order))
        .route("/{order_id}", get(get_order).delete(cancel_order))
        .route("/{order_id}/status", put(update_order_status))
        .route("/user/{user_id}", get(list_orders_by_user))
}

#[utoipa::path(post, path = "/orders", request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order data or insufficient stock"),
        (status = 404, description = "User not found"),
    ),
    tag = "Orders")]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let order = order_service::create_order(&state, request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(get, path = "/orders/{order_id}",
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders")]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let order = order_service::get_order_by_id(&state, &order_id).await?;
    Ok(Json(order))
}

#[utoipa::path(get, path = "/orders/user/{user_id}",
    responses(
        (status = 200, description = "Orders for the user", body = [OrderResponse]),
    ),
    tag = "Orders")]
pub async fn list_orders_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = order_service::get_orders_by_user(&state, &user_id).await?;
    Ok(Json(orders))
}

#[utoipa::path(put, path = "/orders/{order_id}/status", params(StatusQuery),
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders")]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<OrderResponse>> {
    let order = order_service::update_order_status(&state, &order_id, &query.new_status).await?;
    Ok(Json(order))
}

#[utoipa::path(delete, path = "/orders/{order_id}",
    responses(
        (status = 204, description = "Order cancelled"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders")]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<StatusCode> {
    order_service::cancel_order(&state, &order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
    ),
    tag = "Orders")]
pub async fn list_all_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = order_service::get_all_orders(&state).await?;
    Ok(Json(orders))
}
