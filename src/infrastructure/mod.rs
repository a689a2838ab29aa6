pub mod cart_repo;
pub mod catalog_repo;
pub mod content_repo;
pub mod customer_repo;
pub mod models;
pub mod order_repo;

#[cfg(test)]
pub(crate) mod test_db;
#[cfg(test)]
pub(crate) mod test_postgres;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

pub use cart_repo::DieselCartRepository;
pub use catalog_repo::DieselCatalogRepository;
pub use content_repo::DieselContentRepository;
pub use customer_repo::DieselCustomerDirectory;
pub use order_repo::DieselOrderRepository;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::NotFound("record".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DomainError::Conflict(info.message().to_string())
            }
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::CheckViolation,
                info,
            ) => DomainError::InvalidInput(info.message().to_string()),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
