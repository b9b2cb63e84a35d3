//! Role services: global and institution-scoped endpoint families.

use serde_json::json;

use mizan_client::{ApiClient, ApiResult, Paged};
use mizan_core::{InstitutionId, PermissionId, RoleId, UserId};
use mizan_institutions::Employee;

use crate::error::RbacError;
use crate::permission::Permission;
use crate::role::{InstitutionRole, NewInstitutionRole, NewRole, Role, UpdateRole};

/// Operations over the global `/roles` endpoint family.
#[derive(Clone)]
pub struct RoleService {
    api: ApiClient,
}

impl RoleService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: u32) -> ApiResult<Paged<Role>> {
        let per_page = self.api.config().page_size;
        self.api.get_paged("/roles", page, per_page, &[]).await
    }

    /// The full server-defined permission catalogue (for the edit dialog).
    pub async fn list_permissions(&self) -> ApiResult<Vec<Permission>> {
        self.api.get("/permissions", &[]).await
    }

    pub async fn create(&self, payload: &NewRole) -> ApiResult<Role> {
        self.api.post("/roles", payload).await
    }

    /// Edit role metadata. System-protected roles are refused locally —
    /// no request is issued.
    pub async fn update(&self, role: &Role, payload: &UpdateRole) -> Result<Role, RbacError> {
        if role.is_system {
            return Err(RbacError::SystemRoleImmutable);
        }
        Ok(self
            .api
            .put(&format!("/roles/{}", role.id), payload)
            .await?)
    }

    /// Delete a role. Same system-protection guard as [`RoleService::update`].
    pub async fn delete(&self, role: &Role) -> Result<(), RbacError> {
        if role.is_system {
            return Err(RbacError::SystemRoleImmutable);
        }
        Ok(self
            .api
            .delete(&format!("/roles/{}", role.id))
            .await?)
    }

    /// Replace-all permission sync: the full target set is sent and the
    /// server diffs internally. All-or-nothing from the caller's view.
    pub async fn sync_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> ApiResult<Role> {
        self.api
            .post(
                &format!("/roles/{role_id}/permissions/sync"),
                &json!({ "permission_ids": permission_ids }),
            )
            .await
    }

    pub async fn assign_user(&self, role_id: RoleId, user_id: UserId) -> ApiResult<()> {
        self.api
            .post(
                &format!("/roles/{role_id}/users/{user_id}"),
                &json!({}),
            )
            .await
    }

    pub async fn revoke_user(&self, role_id: RoleId, user_id: UserId) -> ApiResult<()> {
        self.api
            .delete(&format!("/roles/{role_id}/users/{user_id}"))
            .await
    }
}

/// Operations over `/institutions/{id}/roles` and employee assignment.
#[derive(Clone)]
pub struct InstitutionRoleService {
    api: ApiClient,
}

impl InstitutionRoleService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        institution_id: InstitutionId,
        page: u32,
    ) -> ApiResult<Paged<InstitutionRole>> {
        let per_page = self.api.config().page_size;
        self.api
            .get_paged(
                &format!("/institutions/{institution_id}/roles"),
                page,
                per_page,
                &[],
            )
            .await
    }

    pub async fn create(
        &self,
        institution_id: InstitutionId,
        payload: &NewInstitutionRole,
    ) -> ApiResult<InstitutionRole> {
        self.api
            .post(&format!("/institutions/{institution_id}/roles"), payload)
            .await
    }

    pub async fn delete(
        &self,
        institution_id: InstitutionId,
        role_id: RoleId,
    ) -> ApiResult<()> {
        self.api
            .delete(&format!("/institutions/{institution_id}/roles/{role_id}"))
            .await
    }

    pub async fn sync_permissions(
        &self,
        institution_id: InstitutionId,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> ApiResult<InstitutionRole> {
        self.api
            .post(
                &format!("/institutions/{institution_id}/roles/{role_id}/permissions/sync"),
                &json!({ "permission_ids": permission_ids }),
            )
            .await
    }

    /// Assign an institution role to an employee.
    ///
    /// One role per employee per institution: the server supersedes any
    /// prior assignment and returns the employee as it now stands; callers
    /// replace their local copy with the response.
    pub async fn assign_employee(
        &self,
        institution_id: InstitutionId,
        user_id: UserId,
        role_id: RoleId,
    ) -> ApiResult<Employee> {
        self.api
            .post(
                &format!("/institutions/{institution_id}/employees/{user_id}"),
                &json!({ "role_id": role_id }),
            )
            .await
    }

    pub async fn remove_employee(
        &self,
        institution_id: InstitutionId,
        user_id: UserId,
    ) -> ApiResult<()> {
        self.api
            .delete(&format!("/institutions/{institution_id}/employees/{user_id}"))
            .await
    }
}
