use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use super::carts::CartResponse;
use super::orders::OrderResponse;
use crate::domain::customer::Customer;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    /// Opaque caller-supplied identity, e.g. a login name
    pub identity: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub identity: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            identity: c.identity,
            phone: c.phone,
            address: c.address,
            created_at: c.created_at,
        }
    }
}

/// POST /customers
///
/// Returns the customer with this identity, creating it on first use.
#[utoipa::path(
    post,
    path = "/customers",
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Existing or new customer", body = CustomerResponse),
        (status = 422, description = "Identity missing or too long"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    state: web::Data<AppState>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let identity = body.into_inner().identity;
    let customer = blocking(move || state.customers.get_or_create_customer(&identity)).await?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// GET /customers/{id}/cart
///
/// The customer's open cart; a new one is created after the previous cart was ordered.
#[utoipa::path(
    get,
    path = "/customers/{id}/cart",
    params(
        ("id" = Uuid, Path, description = "Customer UUID"),
    ),
    responses(
        (status = 200, description = "Open cart", body = CartResponse),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn customer_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let cart = blocking(move || state.customers.active_cart(customer_id)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}/orders",
    params(
        ("id" = Uuid, Path, description = "Customer UUID"),
    ),
    responses(
        (status = 200, description = "Order history, newest first", body = Vec<OrderResponse>),
    ),
    tag = "customers"
)]
pub async fn customer_orders(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let orders = blocking(move || state.orders.customer_orders(customer_id)).await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}
