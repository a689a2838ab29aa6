pub mod cart_service;
pub mod catalog_service;
pub mod content_service;
pub mod customer_service;
pub mod order_service;

#[cfg(test)]
pub(crate) mod memory;
