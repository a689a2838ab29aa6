use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use crate::application::order_service::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::order::{Order, OrderStatus, ShippingForm};
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub customer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Required for delivery.
    pub address: Option<String>,
    /// `self` for pickup or `delivery`
    pub buying_type: String,
    /// Desired date in YYYY-MM-DD format
    pub order_date: String,
    pub comments: Option<String>,
}

impl PlaceOrderRequest {
    fn into_parts(self) -> (Uuid, ShippingForm) {
        (
            self.customer_id,
            ShippingForm {
                first_name: self.first_name,
                last_name: self.last_name,
                phone: self.phone,
                address: self.address,
                buying_type: self.buying_type,
                order_date: self.order_date,
                comments: self.comments,
            },
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cart_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub buying_type: String,
    pub order_date: NaiveDate,
    pub comments: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            cart_id: o.cart_id,
            first_name: o.details.first_name,
            last_name: o.details.last_name,
            phone: o.details.phone,
            address: o.details.address,
            buying_type: o.details.buying_type.as_str().to_string(),
            order_date: o.details.order_date,
            comments: o.details.comments,
            status: o.status.to_string(),
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdvanceStatusRequest {
    /// `in_progress`, `is_ready` or `completed`
    pub status: String,
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /carts/{id}/order
///
/// Turns the cart into an order. The order row, the cart's `in_order` flag,
/// the order-to-cart link and the customer's order history are written in a
/// single database transaction, so a failure leaves the cart open and no
/// order behind.
#[utoipa::path(
    post,
    path = "/carts/{id}/order",
    params(
        ("id" = Uuid, Path, description = "Cart UUID"),
    ),
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 404, description = "Cart or customer not found"),
        (status = 409, description = "Cart already ordered or owned by another customer"),
        (status = 422, description = "Invalid shipping details"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();
    let (customer_id, form) = body.into_inner().into_parts();

    let order = blocking(move || state.orders.place_order(cart_id, customer_id, form)).await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let order = blocking(move || state.orders.get_order(order_id)).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Returns a paginated list of orders, newest first.
/// Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);

    let result = blocking(move || state.orders.list_orders(page, limit)).await?;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// PATCH /orders/{id}/status
///
/// Moves the order forward through new → in_progress → is_ready → completed.
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = AdvanceStatusRequest,
    responses(
        (status = 200, description = "Order with its new status", body = OrderResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Status would move backwards"),
    ),
    tag = "orders"
)]
pub async fn advance_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AdvanceStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = body.status.parse::<OrderStatus>()?;
    let order = blocking(move || state.orders.advance_status(order_id, status)).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
