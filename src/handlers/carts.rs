use actix_web::{web, HttpResponse};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use crate::domain::cart::{parse_quantity, Cart, CartLine};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Decimal line total as a string, e.g. "4500.00"
    pub total_price: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            quantity: line.quantity,
            total_price: line.total_price.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub lines: Vec<CartLineResponse>,
    /// Number of distinct products in the cart
    pub total_products: i32,
    pub total_price: String,
    pub in_order: bool,
    pub for_anonymous_user: bool,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            owner_id: cart.owner_id,
            lines: cart.lines.into_iter().map(Into::into).collect(),
            total_products: cart.total_products,
            total_price: cart.total_price.to_string(),
            in_order: cart.in_order,
            for_anonymous_user: cart.for_anonymous_user,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    /// Positive whole number, as a number or a string. Defaults to 1.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub quantity: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only a missing key is `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Quantity requested by an add call. An empty body or a missing key means 1.
fn add_quantity(body: &[u8]) -> Result<i32, DomainError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(1);
    }
    let request: AddItemRequest = serde_json::from_slice(body)
        .map_err(|e| DomainError::InvalidInput(format!("invalid request body: {e}")))?;
    match request.quantity {
        None => Ok(1),
        Some(value) => parse_quantity(&raw_quantity(&value)?),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeQuantityRequest {
    /// Positive whole number, as a number or a string.
    #[schema(value_type = String)]
    pub quantity: Value,
}

/// The quantity exactly as the customer sent it, for `parse_quantity`.
fn raw_quantity(value: &Value) -> Result<String, DomainError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(DomainError::InvalidInput(format!(
            "quantity must be a positive whole number, got {other}"
        ))),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/carts",
    responses(
        (status = 201, description = "Empty cart for an anonymous visitor", body = CartResponse),
    ),
    tag = "carts"
)]
pub async fn create_cart(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let cart = blocking(move || state.carts.create_anonymous_cart()).await?;
    Ok(HttpResponse::Created().json(CartResponse::from(cart)))
}

#[utoipa::path(
    get,
    path = "/carts/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart UUID"),
    ),
    responses(
        (status = 200, description = "Cart found", body = CartResponse),
        (status = 404, description = "Cart not found"),
    ),
    tag = "carts"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();
    let cart = blocking(move || state.carts.get_cart(cart_id)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

/// POST /carts/{id}/items/{slug}
///
/// Adding a product already in the cart leaves its line as it is.
#[utoipa::path(
    post,
    path = "/carts/{id}/items/{slug}",
    params(
        ("id" = Uuid, Path, description = "Cart UUID"),
        ("slug" = String, Path, description = "Product slug"),
    ),
    request_body(content = AddItemRequest, description = "Optional; a missing body or quantity means 1"),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid quantity or unavailable product"),
        (status = 404, description = "Cart or product not found"),
        (status = 409, description = "Cart already ordered"),
    ),
    tag = "carts"
)]
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let (cart_id, slug) = path.into_inner();
    let quantity = add_quantity(&body)?;
    let cart = blocking(move || state.carts.add_product(cart_id, &slug, quantity)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

#[utoipa::path(
    put,
    path = "/carts/{id}/items/{slug}",
    params(
        ("id" = Uuid, Path, description = "Cart UUID"),
        ("slug" = String, Path, description = "Product slug"),
    ),
    request_body = ChangeQuantityRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Quantity is not a positive whole number"),
        (status = 404, description = "Cart, product or line not found"),
        (status = 409, description = "Cart already ordered"),
    ),
    tag = "carts"
)]
pub async fn change_item_quantity(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    body: web::Json<ChangeQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, slug) = path.into_inner();
    let raw = raw_quantity(&body.quantity)?;
    let cart = blocking(move || state.carts.change_quantity(cart_id, &slug, &raw)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}

#[utoipa::path(
    delete,
    path = "/carts/{id}/items/{slug}",
    params(
        ("id" = Uuid, Path, description = "Cart UUID"),
        ("slug" = String, Path, description = "Product slug"),
    ),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 404, description = "Cart, product or line not found"),
        (status = 409, description = "Cart already ordered"),
    ),
    tag = "carts"
)]
pub async fn remove_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, slug) = path.into_inner();
    let cart = blocking(move || state.carts.remove_product(cart_id, &slug)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(cart)))
}
