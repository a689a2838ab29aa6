use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::validation::FieldErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: Uuid,
    pub identity: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Normalizes the opaque identity a caller presents for a customer.
pub fn validate_identity(identity: &str) -> Result<String, DomainError> {
    let mut errors = FieldErrors::new();
    let identity = errors.required("identity", identity, 150);
    errors.finish()?;
    Ok(identity)
}
