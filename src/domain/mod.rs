pub mod cart;
pub mod catalog;
pub mod content;
pub mod customer;
pub mod errors;
pub mod order;
pub mod ports;
pub mod validation;
