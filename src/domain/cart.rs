use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::catalog::{fits_money_column, Product};
use super::errors::DomainError;

/// One product in a cart with its quantity and subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_price: BigDecimal,
}

impl CartLine {
    fn reprice(&mut self, unit_price: &BigDecimal) {
        self.total_price = BigDecimal::from(self.quantity) * unit_price;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub lines: Vec<CartLine>,
    /// Number of line items, not the sum of their quantities.
    pub total_products: i32,
    pub total_price: BigDecimal,
    pub in_order: bool,
    pub for_anonymous_user: bool,
}

impl Cart {
    pub fn new(owner_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            lines: Vec::new(),
            total_products: 0,
            total_price: BigDecimal::from(0),
            in_order: false,
            for_anonymous_user: owner_id.is_none(),
        }
    }

    pub fn line_for(&self, product_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Adds `product` unless it already has a line; an existing line keeps its quantity.
    ///
    /// Returns the id of the line holding the product.
    pub fn add_product(&mut self, product: &Product, quantity: i32) -> Result<Uuid, DomainError> {
        self.ensure_open()?;
        if !product.available {
            return Err(DomainError::InvalidInput(format!(
                "product '{}' is not available",
                product.slug
            )));
        }
        ensure_positive(quantity)?;

        let mut next = self.clone();
        let line_id = match next.line_for(product.id) {
            Some(line) => line.id,
            None => {
                let mut line = CartLine {
                    id: Uuid::new_v4(),
                    cart_id: next.id,
                    customer_id: next.owner_id,
                    product_id: product.id,
                    quantity,
                    total_price: BigDecimal::from(0),
                };
                line.reprice(&product.price);
                let id = line.id;
                next.lines.push(line);
                id
            }
        };
        self.commit(next)?;
        Ok(line_id)
    }

    pub fn remove_product(&mut self, product: &Product) -> Result<(), DomainError> {
        self.ensure_open()?;
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product.id)
            .ok_or_else(|| not_in_cart(product))?;
        self.lines.remove(index);
        self.recalculate();
        Ok(())
    }

    pub fn change_quantity(&mut self, product: &Product, quantity: i32) -> Result<(), DomainError> {
        self.ensure_open()?;
        ensure_positive(quantity)?;
        let mut next = self.clone();
        let line = next
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
            .ok_or_else(|| not_in_cart(product))?;
        line.quantity = quantity;
        line.reprice(&product.price);
        self.commit(next)
    }

    /// Replaces `self` with the recalculated `next`, unless its total no longer
    /// fits the price columns. Line totals never exceed the cart total.
    fn commit(&mut self, mut next: Cart) -> Result<(), DomainError> {
        next.recalculate();
        if !fits_money_column(&next.total_price) {
            return Err(DomainError::InvalidInput(format!(
                "cart total {} would exceed 99999999.99",
                next.total_price
            )));
        }
        *self = next;
        Ok(())
    }

    pub fn recalculate(&mut self) {
        self.total_products = i32::try_from(self.lines.len()).unwrap_or(i32::MAX);
        self.total_price = self
            .lines
            .iter()
            .fold(BigDecimal::from(0), |acc, l| acc + &l.total_price);
    }

    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.in_order {
            Err(DomainError::Conflict(format!(
                "cart {} has already been ordered",
                self.id
            )))
        } else {
            Ok(())
        }
    }
}

fn not_in_cart(product: &Product) -> DomainError {
    DomainError::NotFound(format!("product '{}' is not in the cart", product.slug))
}

fn ensure_positive(quantity: i32) -> Result<(), DomainError> {
    if quantity < 1 {
        Err(DomainError::InvalidInput(format!(
            "quantity must be a positive whole number, got {quantity}"
        )))
    } else {
        Ok(())
    }
}

/// Parses a quantity typed by a customer.
pub fn parse_quantity(raw: &str) -> Result<i32, DomainError> {
    let raw = raw.trim();
    let quantity: i64 = raw.parse().map_err(|_| {
        DomainError::InvalidInput(format!(
            "quantity must be a positive whole number, got '{raw}'"
        ))
    })?;
    let quantity = i32::try_from(quantity)
        .map_err(|_| DomainError::InvalidInput(format!("quantity {quantity} is too large")))?;
    ensure_positive(quantity)?;
    Ok(quantity)
}
