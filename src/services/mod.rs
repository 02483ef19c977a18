//! Validated operation layer: every write is checked against the caller's
//! role and the field-level validation rules before touching the registre.
//! Report reads perform no permission checks.

pub mod programmation_service;
pub mod reference_service;
pub mod report_service;
pub mod transaction_service;

pub use programmation_service::ProgrammationService;
pub use reference_service::{RubriqueService, ServiceRefService};
pub use report_service::ReportService;
pub use transaction_service::TransactionService;

use crate::errors::CaisseError;
use crate::security::Role;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Caisse(#[from] CaisseError),
    #[error("{0}")]
    Invalid(String),
    #[error("permission denied for role `{0}`")]
    Permission(Role),
}

/// Rejects read-only roles before a create/update.
pub(crate) fn require_write(role: Role) -> ServiceResult<()> {
    if role.can_write() {
        Ok(())
    } else {
        Err(ServiceError::Permission(role))
    }
}

/// Rejects every role but admin before a delete.
pub(crate) fn require_delete(role: Role) -> ServiceResult<()> {
    if role.can_delete() {
        Ok(())
    } else {
        Err(ServiceError::Permission(role))
    }
}
