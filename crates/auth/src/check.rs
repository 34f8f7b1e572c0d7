//! A single, fully-qualified permission check.

use staticperm_core::{AuthorizationError, Permission, PermissionObject};

use crate::{Interceptor, Subject};

/// What the check is about; selects the interceptor scope.
enum Target<'a, T> {
    Global,
    Id(String),
    Item(&'a T),
}

/// Check of one permission string, routed through the action's interceptor.
///
/// Cheap to build and meant to be dropped after use.
pub struct PermissionCheck<'a, T> {
    permission: Permission,
    subject: &'a dyn Subject,
    interceptor: Interceptor<T>,
    target: Target<'a, T>,
}

impl<'a, T: PermissionObject> PermissionCheck<'a, T> {
    /// Global check of `permission` (`type:action`).
    pub fn new(permission: Permission, subject: &'a dyn Subject, interceptor: Interceptor<T>) -> Self {
        Self {
            permission,
            subject,
            interceptor,
            target: Target::Global,
        }
    }

    pub(crate) fn for_id(
        permission: Permission,
        subject: &'a dyn Subject,
        interceptor: Interceptor<T>,
        id: String,
    ) -> Self {
        Self {
            permission,
            subject,
            interceptor,
            target: Target::Id(id),
        }
    }

    pub(crate) fn for_item(
        permission: Permission,
        subject: &'a dyn Subject,
        interceptor: Interceptor<T>,
        item: &'a T,
    ) -> Self {
        Self {
            permission,
            subject,
            interceptor,
            target: Target::Item(item),
        }
    }

    /// Fails if the subject lacks the permission, unless the guard decides
    /// otherwise.
    pub fn check(&self) -> Result<(), AuthorizationError> {
        let subject = self.subject;
        let permission = &self.permission;
        let delegate = || subject.require_permission(permission);

        let result = match &self.target {
            Target::Global => self.interceptor.decide(subject, &delegate),
            Target::Id(id) => self.interceptor.decide_id(subject, id, &delegate),
            Target::Item(item) => self.interceptor.decide_item(subject, item, &delegate),
        };

        if let Err(error) = &result {
            tracing::debug!(%permission, %error, "permission check failed");
        }
        result
    }

    /// Boolean form of [`check`](Self::check). Never fails.
    pub fn is_permitted(&self) -> bool {
        let subject = self.subject;
        let permission = &self.permission;
        let probe = || subject.is_permitted(permission);

        let permitted = match &self.target {
            Target::Global => self.interceptor.test(subject, &probe),
            Target::Id(id) => self.interceptor.test_id(subject, id, &probe),
            Target::Item(item) => self.interceptor.test_item(subject, item, &probe),
        };

        tracing::debug!(%permission, permitted, "permission tested");
        permitted
    }
}

impl<T> PermissionCheck<'_, T> {
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    /// The permission string, without evaluating anything.
    pub fn permission_string(&self) -> &str {
        self.permission.as_str()
    }
}

impl<T> core::fmt::Display for PermissionCheck<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.permission.as_str())
    }
}

impl<T> core::fmt::Debug for PermissionCheck<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PermissionCheck")
            .field("permission", &self.permission)
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::Principal;

    struct Repo;

    impl PermissionObject for Repo {
        fn id(&self) -> Option<Cow<'_, str>> {
            None
        }
    }

    fn principal() -> Principal {
        Principal::new()
            .with_grant("something:create")
            .unwrap()
            .with_grant("something:delete")
            .unwrap()
    }

    fn check<'a>(subject: &'a Principal, permission: &'static str) -> PermissionCheck<'a, Repo> {
        PermissionCheck::new(permission.into(), subject, Interceptor::pass_through())
    }

    #[test]
    fn check_with_required_permission() {
        let subject = principal();
        assert_eq!(check(&subject, "something:create").check(), Ok(()));
    }

    #[test]
    fn check_without_required_permission() {
        let subject = principal();
        assert_eq!(
            check(&subject, "other:create").check(),
            Err(AuthorizationError::forbidden("other:create"))
        );
    }

    #[test]
    fn is_permitted() {
        let subject = principal();
        assert!(check(&subject, "something:create").is_permitted());
        assert!(check(&subject, "something:delete").is_permitted());
        assert!(!check(&subject, "other:delete").is_permitted());
    }

    #[test]
    fn permission_string_and_display() {
        let subject = principal();
        let check = check(&subject, "something:create");
        assert_eq!(check.permission_string(), "something:create");
        assert_eq!(check.to_string(), "something:create");
    }

    #[test]
    fn global_guard_can_swallow_a_denial() {
        let subject = principal();
        let interceptor = Interceptor::pass_through()
            .on_decide(|_, delegate| delegate().or(Ok(())))
            .on_test(|_, _| true);
        let check: PermissionCheck<'_, Repo> =
            PermissionCheck::new("other:create".into(), &subject, interceptor);

        assert_eq!(check.check(), Ok(()));
        assert!(check.is_permitted());
    }
}
