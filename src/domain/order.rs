use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::validation::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStatus {
    New,
    InProgress,
    IsReady,
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::IsReady => "is_ready",
            OrderStatus::Completed => "completed",
        }
    }

    /// Statuses only move forward; skipping ahead is allowed.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        next > self
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "in_progress" => Ok(OrderStatus::InProgress),
            "is_ready" => Ok(OrderStatus::IsReady),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(DomainError::InvalidInput(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyingType {
    SelfPickup,
    Delivery,
}

impl BuyingType {
    pub fn as_str(self) -> &'static str {
        match self {
            BuyingType::SelfPickup => "self",
            BuyingType::Delivery => "delivery",
        }
    }
}

impl fmt::Display for BuyingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuyingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(BuyingType::SelfPickup),
            "delivery" => Ok(BuyingType::Delivery),
            other => Err(DomainError::InvalidInput(format!(
                "unknown buying type '{other}'"
            ))),
        }
    }
}

/// Checkout form exactly as submitted by the buyer.
#[derive(Debug, Clone, Default)]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub buying_type: String,
    pub order_date: String,
    pub comments: Option<String>,
}

/// Buyer details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<String>,
    pub buying_type: BuyingType,
    pub order_date: NaiveDate,
    pub comments: Option<String>,
}

impl ShippingForm {
    pub fn validate(self) -> Result<ShippingDetails, DomainError> {
        let mut errors = FieldErrors::new();
        let first_name = errors.required("first_name", &self.first_name, 255);
        let last_name = errors.required("last_name", &self.last_name, 255);
        let phone = errors.required("phone", &self.phone, 13);
        let address = errors.optional("address", self.address.as_deref(), 1024);
        let comments = errors.optional("comments", self.comments.as_deref(), 4096);

        let buying_type = match self.buying_type.trim().parse::<BuyingType>() {
            Ok(t) => Some(t),
            Err(_) => {
                errors.push("buying_type", "must be 'self' or 'delivery'");
                None
            }
        };
        if buying_type == Some(BuyingType::Delivery) && address.is_none() {
            errors.push("address", "is required for delivery");
        }

        let order_date = match NaiveDate::parse_from_str(self.order_date.trim(), "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push("order_date", "must be a date in YYYY-MM-DD format");
                None
            }
        };

        match (buying_type, order_date, errors.finish()) {
            (Some(buying_type), Some(order_date), Ok(())) => Ok(ShippingDetails {
                first_name,
                last_name,
                phone,
                address,
                buying_type,
                order_date,
                comments,
            }),
            (_, _, Err(e)) => Err(e),
            _ => Err(DomainError::Internal(
                "shipping form passed validation without a buying type or date".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cart_id: Option<Uuid>,
    pub details: ShippingDetails,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub items: Vec<Order>,
    pub total: i64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ShippingForm;

    pub fn shipping_form() -> ShippingForm {
        ShippingForm {
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            phone: "+79001234567".to_string(),
            address: Some("Lenina 1, Moscow".to_string()),
            buying_type: "delivery".to_string(),
            order_date: "2024-06-01".to_string(),
            comments: None,
        }
    }
}
