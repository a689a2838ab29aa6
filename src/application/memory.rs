//! In-memory port implementations backing the service tests.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::Cart;
use crate::domain::catalog::{Category, CategoryDraft, OilSpec, Product, ProductKind, ProductVariant};
use crate::domain::content::{Review, ReviewDraft, Slide, SlideDraft};
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderPage, OrderStatus, ShippingDetails};
use crate::domain::ports::{
    CartRepository, CatalogRepository, ContentRepository, CustomerDirectory, OrderRepository,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    carts: Vec<Cart>,
    orders: Vec<Order>,
    customer_orders: Vec<(Uuid, Uuid)>,
    reviews: Vec<Review>,
    slides: Vec<Slide>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store lock")
    }

    pub fn seed_product(&self, slug: &str, vendor_code: &str, price: &str) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            vendor_code: vendor_code.to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            description: String::new(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            available: true,
            spec: OilSpec::default(),
            variant: ProductVariant::CommercialVehicles,
        };
        self.state().products.push(product.clone());
        product
    }

    pub fn mark_ordered(&self, cart_id: Uuid) {
        let mut state = self.state();
        if let Some(cart) = state.carts.iter_mut().find(|c| c.id == cart_id) {
            cart.in_order = true;
        }
    }

    pub fn order_count(&self) -> usize {
        self.state().orders.len()
    }
}

impl CatalogRepository for MemoryStore {
    fn categories(&self) -> Result<Vec<Category>, DomainError> {
        let mut categories = self.state().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        Ok(self.state().categories.iter().find(|c| c.slug == slug).cloned())
    }

    fn insert_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        let mut state = self.state();
        if state.categories.iter().any(|c| c.slug == draft.slug) {
            return Err(DomainError::Conflict(format!("category '{}' exists", draft.slug)));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: draft.name,
            slug: draft.slug,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    fn products_in_category(&self, category_id: Uuid) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<_> = self
            .state()
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(products)
    }

    fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, DomainError> {
        Ok(self.state().products.iter().find(|p| p.slug == slug).cloned())
    }

    fn latest_products(&self, per_kind: i64) -> Result<Vec<Product>, DomainError> {
        let state = self.state();
        let per_kind = usize::try_from(per_kind).unwrap_or(0);
        Ok(ProductKind::ALL
            .iter()
            .flat_map(|kind| {
                state
                    .products
                    .iter()
                    .rev()
                    .filter(move |p| p.variant.kind() == *kind)
                    .take(per_kind)
            })
            .cloned()
            .collect())
    }

    fn insert_product(&self, product: Product) -> Result<Product, DomainError> {
        let mut state = self.state();
        if state
            .products
            .iter()
            .any(|p| p.slug == product.slug || p.vendor_code == product.vendor_code)
        {
            return Err(DomainError::Conflict(format!(
                "product '{}' already exists",
                product.slug
            )));
        }
        state.products.push(product.clone());
        Ok(product)
    }
}

impl CustomerDirectory for MemoryStore {
    fn get_or_create_customer(&self, identity: &str) -> Result<Customer, DomainError> {
        let mut state = self.state();
        if let Some(customer) = state.customers.iter().find(|c| c.identity == identity) {
            return Ok(customer.clone());
        }
        let customer = Customer {
            id: Uuid::new_v4(),
            identity: identity.to_string(),
            phone: None,
            address: None,
            created_at: Utc::now(),
        };
        state.customers.push(customer.clone());
        Ok(customer)
    }

    fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        Ok(self.state().customers.iter().find(|c| c.id == id).cloned())
    }

    fn get_or_create_active_cart(&self, customer_id: Uuid) -> Result<Cart, DomainError> {
        let mut state = self.state();
        if let Some(cart) = state
            .carts
            .iter()
            .find(|c| c.owner_id == Some(customer_id) && !c.in_order)
        {
            return Ok(cart.clone());
        }
        let cart = Cart::new(Some(customer_id));
        state.carts.push(cart.clone());
        Ok(cart)
    }
}

impl CartRepository for MemoryStore {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        Ok(self.state().carts.iter().find(|c| c.id == id).cloned())
    }

    fn create_anonymous(&self) -> Result<Cart, DomainError> {
        let cart = Cart::new(None);
        self.state().carts.push(cart.clone());
        Ok(cart)
    }

    fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut state = self.state();
        let stored = state
            .carts
            .iter_mut()
            .find(|c| c.id == cart.id)
            .ok_or_else(|| DomainError::NotFound(format!("cart {}", cart.id)))?;
        stored.ensure_open()?;
        *stored = cart.clone();
        Ok(())
    }
}

impl OrderRepository for MemoryStore {
    fn place(
        &self,
        cart_id: Uuid,
        customer_id: Uuid,
        details: ShippingDetails,
    ) -> Result<Order, DomainError> {
        let mut state = self.state();
        if !state.customers.iter().any(|c| c.id == customer_id) {
            return Err(DomainError::NotFound(format!("customer {customer_id}")));
        }
        let cart = state
            .carts
            .iter_mut()
            .find(|c| c.id == cart_id)
            .ok_or_else(|| DomainError::NotFound(format!("cart {cart_id}")))?;
        cart.ensure_open()?;
        if cart.owner_id.is_some_and(|owner| owner != customer_id) {
            return Err(DomainError::Conflict(format!(
                "cart {cart_id} belongs to another customer"
            )));
        }
        cart.in_order = true;

        let order = Order {
            id: Uuid::new_v4(),
            customer_id,
            cart_id: Some(cart_id),
            details,
            status: OrderStatus::New,
            created_at: Utc::now(),
        };
        state.orders.push(order.clone());
        state.customer_orders.push((customer_id, order.id));
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.state().orders.iter().find(|o| o.id == id).cloned())
    }

    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        let state = self.state();
        Ok(state
            .customer_orders
            .iter()
            .rev()
            .filter(|(customer, _)| *customer == customer_id)
            .filter_map(|(_, order_id)| state.orders.iter().find(|o| o.id == *order_id))
            .cloned()
            .collect())
    }

    fn list(&self, page: i64, limit: i64) -> Result<OrderPage, DomainError> {
        let state = self.state();
        let skip = usize::try_from((page - 1) * limit).unwrap_or(0);
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(OrderPage {
            items: state.orders.iter().rev().skip(skip).take(take).cloned().collect(),
            total: i64::try_from(state.orders.len()).unwrap_or(i64::MAX),
        })
    }

    fn advance_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, DomainError> {
        let mut state = self.state();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("order {id}")))?;
        if !order.status.can_advance_to(status) {
            return Err(DomainError::Conflict(format!(
                "order {id} cannot move from {} to {status}",
                order.status
            )));
        }
        order.status = status;
        Ok(order.clone())
    }
}

impl ContentRepository for MemoryStore {
    fn insert_review(&self, draft: ReviewDraft) -> Result<Review, DomainError> {
        let review = Review {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            created_at: Utc::now(),
        };
        self.state().reviews.push(review.clone());
        Ok(review)
    }

    fn latest_reviews(&self, limit: i64) -> Result<Vec<Review>, DomainError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.state().reviews.iter().rev().take(limit).cloned().collect())
    }

    fn slides(&self) -> Result<Vec<Slide>, DomainError> {
        Ok(self.state().slides.clone())
    }

    fn insert_slide(&self, draft: SlideDraft) -> Result<Slide, DomainError> {
        let slide = Slide {
            id: Uuid::new_v4(),
            name: draft.name,
            title: draft.title.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            image: draft.image,
            created_at: Utc::now(),
        };
        self.state().slides.push(slide.clone());
        Ok(slide)
    }
}
