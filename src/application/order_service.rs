use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderPage, OrderStatus, ShippingForm};
use crate::domain::ports::OrderRepository;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the checkout form, then turns the cart into an order in one transaction.
    pub fn place_order(
        &self,
        cart_id: Uuid,
        customer_id: Uuid,
        form: ShippingForm,
    ) -> Result<Order, DomainError> {
        let details = form.validate()?;
        match self.repo.place(cart_id, customer_id, details) {
            Ok(order) => {
                log::info!(
                    "Order {} placed by customer {} from cart {}",
                    order.id,
                    customer_id,
                    cart_id
                );
                Ok(order)
            }
            Err(DomainError::Conflict(msg)) => {
                log::warn!("Rejected order for cart {cart_id}: {msg}");
                Err(DomainError::Conflict(msg))
            }
            Err(e) => Err(e),
        }
    }

    pub fn get_order(&self, id: Uuid) -> Result<Order, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::NotFound(format!("order {id}")))
    }

    pub fn customer_orders(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        self.repo.list_for_customer(customer_id)
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<OrderPage, DomainError> {
        self.repo.list(page.max(1), limit.clamp(1, MAX_PAGE_SIZE))
    }

    pub fn advance_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, DomainError> {
        let order = self.repo.advance_status(id, status)?;
        log::info!("Order {} moved to {}", order.id, order.status);
        Ok(order)
    }
}
