use uuid::Uuid;

use super::cart::Cart;
use super::catalog::{Category, CategoryDraft, Product};
use super::content::{Review, ReviewDraft, Slide, SlideDraft};
use super::customer::Customer;
use super::errors::DomainError;
use super::order::{Order, OrderPage, OrderStatus, ShippingDetails};

pub trait CatalogRepository: Send + Sync + 'static {
    fn categories(&self) -> Result<Vec<Category>, DomainError>;
    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
    fn insert_category(&self, draft: CategoryDraft) -> Result<Category, DomainError>;
    fn products_in_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError>;
    fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError>;
    /// Newest products of every kind, `per_kind` of each, light motor oils first.
    fn latest_products(&self, per_kind: i64) -> Result<Vec<Product>, DomainError>;
    fn insert_product(&self, product: Product) -> Result<Product, DomainError>;
}

pub trait CustomerDirectory: Send + Sync + 'static {
    fn get_or_create_customer(&self, identity: &str) -> Result<Customer, DomainError>;
    fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    /// Returns the customer's single open cart, creating it when there is none.
    fn get_or_create_active_cart(&self, customer_id: Uuid) -> Result<Cart, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError>;
    fn create_anonymous(&self) -> Result<Cart, DomainError>;
    /// Persists lines and totals. Fails with `Conflict` if the stored cart is already ordered.
    fn save(&self, cart: &Cart) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Creates the order, closes the cart, links both and records the order
    /// in the customer's history, all or nothing.
    fn place(
        &self,
        cart_id: Uuid,
        customer_id: Uuid,
        details: ShippingDetails,
    ) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError>;
    fn list(&self, page: i64, limit: i64) -> Result<OrderPage, DomainError>;
    fn advance_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, DomainError>;
}

pub trait ContentRepository: Send + Sync + 'static {
    fn insert_review(&self, draft: ReviewDraft) -> Result<Review, DomainError>;
    fn latest_reviews(&self, limit: i64) -> Result<Vec<Review>, DomainError>;
    fn slides(&self) -> Result<Vec<Slide>, DomainError>;
    fn insert_slide(&self, draft: SlideDraft) -> Result<Slide, DomainError>;
}
