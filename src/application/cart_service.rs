use uuid::Uuid;

use crate::domain::cart::{parse_quantity, Cart};
use crate::domain::catalog::Product;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CatalogRepository};

/// Cart actions. Every mutation recalculates totals before the cart is saved.
pub struct CartService<C, R> {
    catalog: C,
    carts: R,
}

impl<C: CatalogRepository, R: CartRepository> CartService<C, R> {
    pub fn new(catalog: C, carts: R) -> Self {
        Self { catalog, carts }
    }

    pub fn get_cart(&self, cart_id: Uuid) -> Result<Cart, DomainError> {
        self.carts
            .find_by_id(cart_id)?
            .ok_or_else(|| DomainError::NotFound(format!("cart {cart_id}")))
    }

    pub fn create_anonymous_cart(&self) -> Result<Cart, DomainError> {
        self.carts.create_anonymous()
    }

    pub fn add_product(&self, cart_id: Uuid, slug: &str, quantity: i32) -> Result<Cart, DomainError> {
        let product = self.product(slug)?;
        let mut cart = self.get_cart(cart_id)?;
        cart.add_product(&product, quantity)?;
        self.carts.save(&cart)?;
        log::debug!("Added {} to cart {}", product.slug, cart.id);
        Ok(cart)
    }

    pub fn remove_product(&self, cart_id: Uuid, slug: &str) -> Result<Cart, DomainError> {
        let product = self.product(slug)?;
        let mut cart = self.get_cart(cart_id)?;
        cart.remove_product(&product)?;
        self.carts.save(&cart)?;
        log::debug!("Removed {} from cart {}", product.slug, cart.id);
        Ok(cart)
    }

    /// `raw_quantity` is the value as the customer typed it.
    pub fn change_quantity(
        &self,
        cart_id: Uuid,
        slug: &str,
        raw_quantity: &str,
    ) -> Result<Cart, DomainError> {
        let quantity = parse_quantity(raw_quantity)?;
        let product = self.product(slug)?;
        let mut cart = self.get_cart(cart_id)?;
        cart.change_quantity(&product, quantity)?;
        self.carts.save(&cart)?;
        log::debug!("Set {} x{} in cart {}", product.slug, quantity, cart.id);
        Ok(cart)
    }

    fn product(&self, slug: &str) -> Result<Product, DomainError> {
        self.catalog
            .find_product_by_slug(slug)?
            .ok_or_else(|| DomainError::NotFound(format!("product '{slug}'")))
    }
}
