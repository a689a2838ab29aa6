pub mod carts;
pub mod catalog;
pub mod content;
pub mod customers;
pub mod orders;

use actix_web::web;

use crate::domain::errors::DomainError;
use crate::errors::AppError;

/// Runs a service call on actix-web's blocking pool; Diesel connections are synchronous.
pub(crate) async fn blocking<T, F>(call: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(call).await??)
}
