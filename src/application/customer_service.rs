use uuid::Uuid;

use crate::domain::cart::Cart;
use crate::domain::customer::{validate_identity, Customer};
use crate::domain::errors::DomainError;
use crate::domain::ports::CustomerDirectory;

pub struct CustomerService<D> {
    directory: D,
}

impl<D: CustomerDirectory> CustomerService<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub fn get_or_create_customer(&self, identity: &str) -> Result<Customer, DomainError> {
        let identity = validate_identity(identity)?;
        self.directory.get_or_create_customer(&identity)
    }

    pub fn active_cart(&self, customer_id: Uuid) -> Result<Cart, DomainError> {
        if self.directory.find_customer(customer_id)?.is_none() {
            return Err(DomainError::NotFound(format!("customer {customer_id}")));
        }
        self.directory.get_or_create_active_cart(customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::memory::MemoryStore;

    #[test]
    fn same_identity_yields_same_customer() {
        let service = CustomerService::new(MemoryStore::default());
        let first = service.get_or_create_customer("ivan@example.com").expect("create");
        let second = service.get_or_create_customer(" ivan@example.com ").expect("get");
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn blank_identity_is_rejected() {
        let service = CustomerService::new(MemoryStore::default());
        assert!(matches!(
            service.get_or_create_customer("  "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn active_cart_is_reused_until_ordered() {
        let store = MemoryStore::default();
        let service = CustomerService::new(store.clone());
        let customer = service.get_or_create_customer("ivan@example.com").expect("create");

        let first = service.active_cart(customer.id).expect("cart");
        let second = service.active_cart(customer.id).expect("cart");
        assert_eq!(first.id, second.id);
        assert_eq!(first.owner_id, Some(customer.id));

        store.mark_ordered(first.id);
        let third = service.active_cart(customer.id).expect("cart");
        assert_ne!(third.id, first.id);
    }

    #[test]
    fn unknown_customer_has_no_cart() {
        let service = CustomerService::new(MemoryStore::default());
        assert!(matches!(
            service.active_cart(Uuid::new_v4()),
            Err(DomainError::NotFound(_))
        ));
    }
}
