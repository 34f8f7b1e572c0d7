use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use staticperm_auth::{
    AuthorizationError, Guard, GuardBinding, Interceptor, PermissionGuard, PermissionObject,
    SchemaError, static_permissions,
};

/// Id of the repository no one may delete.
pub const PROTECTED_REPOSITORY: &str = "mustNotBeDeleted";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
}

impl Repository {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl PermissionObject for Repository {
    fn id(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.id))
    }
}

static_permissions! {
    /// Permission accessors for [`Repository`].
    pub struct RepositoryPermissions for Repository {
        type_id: "repositories",
        item_actions: [read, modify, delete],
        global_actions: [create],
        allow_custom_item: true,
        allow_custom_global: true,
    }
}

/// Vetoes every action on [`PROTECTED_REPOSITORY`], regardless of grants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectedRepositoryGuard;

impl PermissionGuard<Repository> for ProtectedRepositoryGuard {
    fn intercept(&self, action: &str) -> Interceptor<Repository> {
        let permission = format!("repositories:{action}:{PROTECTED_REPOSITORY}");
        Interceptor::pass_through()
            .on_test_id(|_, id, probe| id != PROTECTED_REPOSITORY && probe())
            .on_decide_id(move |_, id, delegate| {
                if id == PROTECTED_REPOSITORY {
                    tracing::debug!(%permission, "protected repository");
                    return Err(AuthorizationError::denied(
                        permission.as_str(),
                        "repository is protected",
                    ));
                }
                delegate()
            })
    }
}

/// Repository permissions with [`ProtectedRepositoryGuard`] on `delete`.
pub fn repository_permissions() -> Result<RepositoryPermissions, SchemaError> {
    RepositoryPermissions::new([GuardBinding::for_action(
        "delete",
        Guard::new(ProtectedRepositoryGuard),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use staticperm_auth::{Principal, Subject};

    fn admin() -> Principal {
        Principal::new().with_grant("repositories:*").unwrap()
    }

    #[test]
    fn repository_exposes_its_id() {
        let repository = Repository::new("1234");
        assert_eq!(repository.permission_id(), "1234");
    }

    #[test]
    fn protected_repository_cannot_be_deleted_even_by_admin() {
        let permissions = repository_permissions().unwrap();
        let admin = admin();
        let delete = permissions.delete(&admin);

        assert!(admin.is_permitted(&delete.permission_string(Some(PROTECTED_REPOSITORY))));
        assert!(!delete.is_permitted(PROTECTED_REPOSITORY));
        assert!(!delete.is_permitted_item(&Repository::new(PROTECTED_REPOSITORY)));
        assert_eq!(
            delete.check(PROTECTED_REPOSITORY),
            Err(AuthorizationError::denied(
                "repositories:delete:mustNotBeDeleted",
                "repository is protected"
            ))
        );
        assert!(delete.check("1234").is_ok());
    }

    #[test]
    fn guard_is_only_bound_to_delete() {
        let permissions = repository_permissions().unwrap();
        let admin = admin();
        assert!(permissions.read(&admin).is_permitted(PROTECTED_REPOSITORY));
        assert!(permissions.modify(&admin).check(PROTECTED_REPOSITORY).is_ok());
    }

    #[test]
    fn guard_is_symmetric() {
        let permissions = repository_permissions().unwrap();
        assert!(permissions.surface().lint().is_empty());
    }
}
