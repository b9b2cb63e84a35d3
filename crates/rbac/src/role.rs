//! Role read models and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mizan_core::{InstitutionId, LocalizedText, RoleId};

use crate::permission::Permission;

/// A global role.
///
/// # Invariants
/// - `is_system` roles cannot be edited or deleted; the client refuses to
///   even issue the request.
/// - `permissions` reflects the server state as of the last fetch; the sync
///   endpoint replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    #[serde(default)]
    pub slug: Option<String>,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Role {
    pub fn name(&self) -> LocalizedText {
        LocalizedText::new(self.name_en.clone(), self.name_ar.clone())
    }
}

/// An institution-scoped role: no slug, bilingual name, one owning
/// institution, its own endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRole {
    pub id: RoleId,
    pub institution_id: InstitutionId,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl InstitutionRole {
    pub fn name(&self) -> LocalizedText {
        LocalizedText::new(self.name_en.clone(), self.name_ar.clone())
    }
}

/// Payload for creating a global role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub name_en: String,
    pub name_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Payload for editing a global role's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRole {
    pub name_en: String,
    pub name_ar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

/// Payload for creating an institution role (scope is implicit in the path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInstitutionRole {
    pub name_en: String,
    pub name_ar: String,
}
