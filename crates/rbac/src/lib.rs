//! `mizan-rbac` — the role/permission access-control model.
//!
//! Two parallel role systems share this crate: **global roles** (sluggable,
//! some system-protected) and **institution roles** (bilingual name only,
//! scoped to exactly one institution, one per employee). Permissions are
//! defined server-side and only referenced here; grouping them is a display
//! concern with no access-control meaning.

pub mod editor;
pub mod error;
pub mod permission;
pub mod role;
pub mod service;
pub mod slug;

pub use editor::{EditorPhase, RoleEditor};
pub use error::RbacError;
pub use permission::{GroupState, Permission, PermissionSelection, group_permissions};
pub use role::{InstitutionRole, NewInstitutionRole, NewRole, Role, UpdateRole};
pub use service::{InstitutionRoleService, RoleService};
pub use slug::{SlugField, slugify};
