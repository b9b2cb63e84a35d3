//! RBAC failure taxonomy.

use thiserror::Error;

use mizan_client::ApiError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RbacError {
    /// Attempted edit/delete of a system-protected role. Raised before any
    /// request is composed; the server never sees these.
    #[error("system roles cannot be edited or deleted")]
    SystemRoleImmutable,

    #[error(transparent)]
    Api(#[from] ApiError),
}
