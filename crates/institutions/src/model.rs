//! Read models for the institution hierarchy.
//!
//! Field names match the wire format (suffixed bilingual fields); the
//! `name()`-style helpers assemble [`LocalizedText`] pairs for display code.

use serde::{Deserialize, Serialize};

use mizan_core::{BranchId, InstitutionId, LocalizedText, RoleId, SafeId, UserId, WarehouseId};

/// Business vertical of an institution; decides which console screens apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SystemType {
    Restaurant,
    #[default]
    Retail,
}

/// Tenant-like entity owning branches, employees and scoped settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: InstitutionId,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub activity_en: String,
    #[serde(default)]
    pub activity_ar: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tax_number: String,
    #[serde(default)]
    pub registry_number: String,
    #[serde(default)]
    pub system_type: SystemType,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Institution {
    pub fn name(&self) -> LocalizedText {
        LocalizedText::new(self.name_en.clone(), self.name_ar.clone())
    }

    pub fn activity(&self) -> LocalizedText {
        LocalizedText::new(self.activity_en.clone(), self.activity_ar.clone())
    }
}

/// Update payload for the institution record's own fields.
///
/// Also issued by the settings save path so the company baseline used on the
/// next settings resolution stays consistent with what was just saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateInstitution {
    pub name_en: String,
    pub name_ar: String,
    pub activity_en: String,
    pub activity_ar: String,
    pub phone: String,
    pub email: String,
    pub system_type: SystemType,
}

/// A branch of an institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub institution_id: InstitutionId,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Branch {
    pub fn name(&self) -> LocalizedText {
        LocalizedText::new(self.name_en.clone(), self.name_ar.clone())
    }
}

/// A cash safe within a branch. Balance is a display-only figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Safe {
    pub id: SafeId,
    pub branch_id: BranchId,
    pub name_en: String,
    pub name_ar: String,
    #[serde(default)]
    pub balance: Option<f64>,
}

/// A stock warehouse within a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub branch_id: BranchId,
    pub name_en: String,
    pub name_ar: String,
}

/// Slim reference to the one institution role an employee holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRoleRef {
    pub id: RoleId,
    pub name_en: String,
    pub name_ar: String,
}

/// An employee of an institution.
///
/// Holds **at most one** institution role; assignment supersedes any prior
/// role (enforced server-side, mirrored by the client model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub user_id: UserId,
    pub institution_id: InstitutionId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<InstitutionRoleRef>,
}

impl Employee {
    /// Apply a confirmed role assignment: the new role replaces any prior one.
    pub fn apply_role_assignment(&mut self, role: InstitutionRoleRef) {
        self.role = Some(role);
    }

    /// Apply removal from the institution role.
    pub fn apply_role_removal(&mut self) {
        self.role = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SystemType::Restaurant).unwrap(),
            "\"restaurant\""
        );
        let parsed: SystemType = serde_json::from_str("\"retail\"").unwrap();
        assert_eq!(parsed, SystemType::Retail);
    }

    #[test]
    fn institution_decodes_with_missing_optional_fields() {
        let institution: Institution = serde_json::from_str(
            r#"{"id": 7, "name_en": "Acme", "name_ar": "أكمي"}"#,
        )
        .unwrap();

        assert_eq!(institution.id, InstitutionId::new(7));
        assert_eq!(institution.system_type, SystemType::Retail);
        assert!(institution.is_active);
        assert_eq!(institution.name().get(mizan_core::Lang::En), "Acme");
    }

    #[test]
    fn role_assignment_supersedes_prior_role() {
        let mut employee = Employee {
            user_id: UserId::new(5),
            institution_id: InstitutionId::new(7),
            name: "Sara".to_string(),
            email: String::new(),
            role: Some(InstitutionRoleRef {
                id: RoleId::new(1),
                name_en: "Cashier".to_string(),
                name_ar: "كاشير".to_string(),
            }),
        };

        employee.apply_role_assignment(InstitutionRoleRef {
            id: RoleId::new(2),
            name_en: "Branch Manager".to_string(),
            name_ar: "مدير فرع".to_string(),
        });

        // Exactly one active role, the new one.
        assert_eq!(employee.role.as_ref().map(|r| r.id), Some(RoleId::new(2)));
    }
}
