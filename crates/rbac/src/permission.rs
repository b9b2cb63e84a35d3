//! Permissions, display grouping, and the editable selection set.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use mizan_core::PermissionId;

/// Group label for permissions the server left ungrouped.
pub const UNGROUPED: &str = "other";

/// A permission as defined server-side. Referenced, never created, here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
}

impl Permission {
    /// Display group, defaulting to [`UNGROUPED`].
    pub fn group_label(&self) -> &str {
        self.group.as_deref().filter(|g| !g.is_empty()).unwrap_or(UNGROUPED)
    }
}

/// Partition permissions into named display groups.
///
/// Purely a UI organization; group membership has no access-control meaning.
pub fn group_permissions(permissions: &[Permission]) -> BTreeMap<String, Vec<Permission>> {
    let mut groups: BTreeMap<String, Vec<Permission>> = BTreeMap::new();
    for permission in permissions {
        groups
            .entry(permission.group_label().to_string())
            .or_default()
            .push(permission.clone());
    }
    groups
}

/// Checkbox state of a group relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    None,
    Partial,
    All,
}

/// The editable permission set of a role-edit session.
///
/// Group and select-all toggles are **symmetric differences** against the
/// relevant id set: each member's selection flips. That implements the
/// select-all/clear-all checkbox for uniform groups and makes every toggle
/// involutive — applying it twice always restores the prior selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSelection {
    selected: BTreeSet<PermissionId>,
}

impl PermissionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from a role's current permissions.
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        Self {
            selected: permissions.iter().map(|p| p.id).collect(),
        }
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in stable (ascending) order, ready for a sync call.
    pub fn ids(&self) -> Vec<PermissionId> {
        self.selected.iter().copied().collect()
    }

    /// Flip a single permission.
    pub fn toggle(&mut self, id: PermissionId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Flip every permission in `ids` (group or select-all toggle).
    pub fn toggle_ids(&mut self, ids: &[PermissionId]) {
        for id in ids {
            self.toggle(*id);
        }
    }

    /// Flip a whole display group.
    pub fn toggle_group(&mut self, group: &[Permission]) {
        for permission in group {
            self.toggle(permission.id);
        }
    }

    /// Checkbox state of a group for rendering.
    pub fn group_state(&self, group: &[Permission]) -> GroupState {
        let selected = group.iter().filter(|p| self.contains(p.id)).count();
        if selected == 0 {
            GroupState::None
        } else if selected == group.len() {
            GroupState::All
        } else {
            GroupState::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn perm(id: i64, group: Option<&str>) -> Permission {
        Permission {
            id: PermissionId::new(id),
            name: format!("perm-{id}"),
            group: group.map(str::to_string),
        }
    }

    #[test]
    fn grouping_defaults_to_other() {
        let permissions = vec![
            perm(1, Some("sales")),
            perm(2, Some("sales")),
            perm(3, None),
            perm(4, Some("")),
        ];

        let groups = group_permissions(&permissions);
        assert_eq!(groups["sales"].len(), 2);
        assert_eq!(groups[UNGROUPED].len(), 2);
    }

    #[test]
    fn empty_group_selects_all_and_full_group_clears() {
        let group = vec![perm(1, None), perm(2, None), perm(3, None)];
        let mut selection = PermissionSelection::new();

        selection.toggle_group(&group);
        assert_eq!(selection.group_state(&group), GroupState::All);

        selection.toggle_group(&group);
        assert_eq!(selection.group_state(&group), GroupState::None);
        assert!(selection.is_empty());
    }

    #[test]
    fn prepopulates_from_role_permissions() {
        let permissions = vec![perm(5, None), perm(9, None)];
        let selection = PermissionSelection::from_permissions(&permissions);
        assert!(selection.contains(PermissionId::new(5)));
        assert!(selection.contains(PermissionId::new(9)));
        assert_eq!(
            selection.ids(),
            vec![PermissionId::new(5), PermissionId::new(9)]
        );
    }

    proptest! {
        /// Toggling any group twice restores the original selection exactly.
        #[test]
        fn group_toggle_is_involutive(
            selected in proptest::collection::btree_set(0i64..50, 0..20),
            group_ids in proptest::collection::btree_set(0i64..50, 0..20),
        ) {
            let mut selection = PermissionSelection::new();
            for id in &selected {
                selection.toggle(PermissionId::new(*id));
            }
            let before = selection.clone();

            let group: Vec<Permission> = group_ids
                .iter()
                .map(|id| perm(*id, Some("g")))
                .collect();

            selection.toggle_group(&group);
            selection.toggle_group(&group);

            prop_assert_eq!(selection, before);
        }
    }
}
