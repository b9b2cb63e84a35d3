//! Role-edit session state machine.
//!
//! `Idle → Loading → Editing → Saving → {Idle | Editing}`. One logical
//! operation may be in flight at a time: a save while saving (or editing
//! while loading) is refused, never cancelled — there is no request
//! cancellation anywhere in the client.

use std::collections::BTreeSet;

use mizan_core::{DomainError, DomainResult, PermissionId, RoleId};

use crate::permission::{Permission, PermissionSelection};
use crate::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Idle,
    Loading,
    Editing,
    Saving,
}

/// One role's permission-edit session.
///
/// The editor holds the editable selection and the server baseline; the
/// owning view drives it: `begin` before fetching, `loaded` with the fetched
/// role, `begin_save` to snapshot the set for the sync call, then either
/// `save_succeeded` or `save_failed`.
#[derive(Debug, Clone, Default)]
pub struct RoleEditor {
    phase: EditorPhase,
    role_id: Option<RoleId>,
    selection: PermissionSelection,
    baseline: BTreeSet<PermissionId>,
    last_error: Option<String>,
}

impl RoleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    pub fn selection(&self) -> &PermissionSelection {
        &self.selection
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the selection diverges from the server state.
    pub fn is_dirty(&self) -> bool {
        self.selection.ids().into_iter().collect::<BTreeSet<_>>() != self.baseline
    }

    /// Open the editor for a role; the caller then fetches the permission
    /// catalogue and the role and calls [`RoleEditor::loaded`].
    pub fn begin(&mut self, role_id: RoleId) -> DomainResult<()> {
        if self.phase != EditorPhase::Idle {
            return Err(DomainError::invariant("editor already in use"));
        }
        self.phase = EditorPhase::Loading;
        self.role_id = Some(role_id);
        self.last_error = None;
        Ok(())
    }

    /// Install the fetched role: selection pre-populated from its current
    /// permissions, baseline remembered for dirty tracking.
    pub fn loaded(&mut self, role: &Role) -> DomainResult<()> {
        if self.phase != EditorPhase::Loading {
            return Err(DomainError::invariant("editor is not loading"));
        }
        if self.role_id != Some(role.id) {
            return Err(DomainError::invariant("loaded role does not match session"));
        }
        self.selection = PermissionSelection::from_permissions(&role.permissions);
        self.baseline = role.permissions.iter().map(|p| p.id).collect();
        self.phase = EditorPhase::Editing;
        Ok(())
    }

    pub fn toggle(&mut self, id: PermissionId) -> DomainResult<()> {
        self.ensure_editing()?;
        self.selection.toggle(id);
        Ok(())
    }

    pub fn toggle_group(&mut self, group: &[Permission]) -> DomainResult<()> {
        self.ensure_editing()?;
        self.selection.toggle_group(group);
        Ok(())
    }

    /// Snapshot the target set and enter `Saving`. The caller passes the
    /// returned ids to the sync endpoint; no partial save exists.
    pub fn begin_save(&mut self) -> DomainResult<Vec<PermissionId>> {
        self.ensure_editing()?;
        self.phase = EditorPhase::Saving;
        self.last_error = None;
        Ok(self.selection.ids())
    }

    /// Sync confirmed; session ends, caller refetches the role list.
    pub fn save_succeeded(&mut self) -> DomainResult<()> {
        if self.phase != EditorPhase::Saving {
            return Err(DomainError::invariant("no save in flight"));
        }
        *self = Self::default();
        Ok(())
    }

    /// Sync failed; stay in the session with the selection intact so the
    /// user does not lose edits.
    pub fn save_failed(&mut self, message: impl Into<String>) -> DomainResult<()> {
        if self.phase != EditorPhase::Saving {
            return Err(DomainError::invariant("no save in flight"));
        }
        self.phase = EditorPhase::Editing;
        self.last_error = Some(message.into());
        Ok(())
    }

    /// Abandon the session from any phase.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    fn ensure_editing(&self) -> DomainResult<()> {
        if self.phase != EditorPhase::Editing {
            return Err(DomainError::invariant("editor is not in the editing phase"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(id: i64) -> Permission {
        Permission {
            id: PermissionId::new(id),
            name: format!("perm-{id}"),
            group: None,
        }
    }

    fn role_with_perms(ids: &[i64]) -> Role {
        Role {
            id: RoleId::new(9),
            slug: Some("manager".to_string()),
            name_en: "Manager".to_string(),
            name_ar: "مدير".to_string(),
            description: None,
            is_active: true,
            is_system: false,
            permissions: ids.iter().map(|id| perm(*id)).collect(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn full_successful_session() {
        let mut editor = RoleEditor::new();
        editor.begin(RoleId::new(9)).unwrap();
        assert_eq!(editor.phase(), EditorPhase::Loading);

        editor.loaded(&role_with_perms(&[1, 2])).unwrap();
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert!(!editor.is_dirty());

        editor.toggle(PermissionId::new(3)).unwrap();
        assert!(editor.is_dirty());

        let ids = editor.begin_save().unwrap();
        assert_eq!(
            ids,
            vec![
                PermissionId::new(1),
                PermissionId::new(2),
                PermissionId::new(3)
            ]
        );

        editor.save_succeeded().unwrap();
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn failed_save_keeps_selection_and_reports_error() {
        let mut editor = RoleEditor::new();
        editor.begin(RoleId::new(9)).unwrap();
        editor.loaded(&role_with_perms(&[1])).unwrap();
        editor.toggle(PermissionId::new(2)).unwrap();

        let _ids = editor.begin_save().unwrap();
        editor.save_failed("validation failed").unwrap();

        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.last_error(), Some("validation failed"));
        assert!(editor.selection().contains(PermissionId::new(2)));
    }

    #[test]
    fn concurrent_operations_are_refused() {
        let mut editor = RoleEditor::new();
        editor.begin(RoleId::new(9)).unwrap();

        // A second session while one is open.
        assert!(editor.begin(RoleId::new(10)).is_err());

        editor.loaded(&role_with_perms(&[])).unwrap();
        let _ids = editor.begin_save().unwrap();

        // No edits or second save while a save is in flight.
        assert!(editor.toggle(PermissionId::new(1)).is_err());
        assert!(editor.begin_save().is_err());
    }

    #[test]
    fn loaded_role_must_match_session() {
        let mut editor = RoleEditor::new();
        editor.begin(RoleId::new(1)).unwrap();

        let err = editor.loaded(&role_with_perms(&[])).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }
}
