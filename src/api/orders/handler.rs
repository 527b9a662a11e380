//! Orders API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::orders::{self, NewOrderRequest};
use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::domain::{
    AssignmentInfo, DeliveryAddress, Order, OrderFilter, OrderItem, OrderStatus, OrderType,
};
use crate::utils::AppResult;

// ========== Responses ==========

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub menu_item_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddressResponse {
    pub street: String,
    pub city: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub courier_id: Uuid,
    pub assigned_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_for_delivery_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unable_to_deliver_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<DeliveryAddressResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<AssignmentResponse>,
    /// Estimated travel time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_time_needed: Option<i64>,
}

impl From<&OrderItem> for OrderItemResponse {
    fn from(item: &OrderItem) -> Self {
        Self {
            menu_item_id: item.menu_item_id(),
            name: item.name().to_string(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
            notes: item.notes().map(str::to_string),
        }
    }
}

impl From<&DeliveryAddress> for DeliveryAddressResponse {
    fn from(address: &DeliveryAddress) -> Self {
        Self {
            street: address.street().to_string(),
            city: address.city().to_string(),
            zip: address.zip().to_string(),
            line2: address.line2().map(str::to_string),
            country: address.country().map(str::to_string),
        }
    }
}

impl From<&AssignmentInfo> for AssignmentResponse {
    fn from(assignment: &AssignmentInfo) -> Self {
        Self {
            courier_id: assignment.courier_id(),
            assigned_at: assignment.assigned_at(),
            out_for_delivery_at: assignment.out_for_delivery_at(),
            delivered_at: assignment.delivered_at(),
            unable_to_deliver_at: assignment.unable_to_deliver_at(),
        }
    }
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            customer_id: order.customer_id(),
            order_type: order.order_type(),
            status: order.status(),
            created_at: order.created_at(),
            items: order.items().iter().map(OrderItemResponse::from).collect(),
            total: order.total(),
            delivery_address: order.delivery_address().map(DeliveryAddressResponse::from),
            assignment: order.assignment().map(AssignmentResponse::from),
            delivery_time_needed: order.delivery_time_needed().map(|d| d.num_seconds()),
        }
    }
}

// ========== Requests ==========

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
    #[serde(rename = "type")]
    pub order_type: Option<OrderType>,
    pub assigned_courier_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusQuery {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCourierRequest {
    pub courier_id: Uuid,
}

// ========== Handlers ==========

/// POST /api/orders - place an order (customer)
pub async fn place(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<NewOrderRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = orders::place_order(&state.ctx, &actor, payload).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// GET /api/orders - list orders, scoped by role
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let filter = OrderFilter {
        status: query.status,
        order_type: query.order_type,
        assigned_courier_id: query.assigned_courier_id,
        customer_id: query.customer_id,
    };
    let found = orders::list_orders(&state.ctx, &actor, filter, query.max_results).await?;
    Ok(Json(found.iter().map(OrderResponse::from).collect()))
}

/// GET /api/orders/assignments - the calling courier's in-flight deliveries
pub async fn my_deliveries(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let found = orders::my_deliveries(&state.ctx, &actor).await?;
    Ok(Json(found.iter().map(OrderResponse::from).collect()))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderResponse>> {
    let order = orders::get_order(&state.ctx, &actor, id).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// PATCH /api/orders/:id/status?status=Preparing
pub async fn update_status(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    Query(query): Query<UpdateStatusQuery>,
) -> AppResult<Json<OrderResponse>> {
    let order = orders::update_status(&state.ctx, &actor, id, query.status).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /api/orders/:id/assignments - assign a courier (kitchen, admin)
pub async fn assign_courier(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignCourierRequest>,
) -> AppResult<Json<OrderResponse>> {
    let order = orders::assign_courier(&state.ctx, &actor, id, payload.courier_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}
