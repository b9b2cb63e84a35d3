//! `mizan-core` — shared foundation for the console client core.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP): typed
//! identifiers, the domain error model, and the bilingual locale types used
//! across every other crate in the workspace.

pub mod error;
pub mod id;
pub mod locale;

pub use error::{DomainError, DomainResult};
pub use id::{BranchId, InstitutionId, PermissionId, RoleId, SafeId, SettingId, UserId, WarehouseId};
pub use locale::{Lang, LocalizedText};
