//! Item-scoped checks for one action.

use std::marker::PhantomData;

use staticperm_core::{AuthorizationError, Permission, PermissionObject};

use crate::{Interceptor, PermissionCheck, Subject};

/// Checks of one item action (`type:action`) against ids or items.
pub struct PermissionActionCheck<'a, T> {
    prefix: Permission,
    subject: &'a dyn Subject,
    interceptor: Interceptor<T>,
    // Checks handed out borrow items for up to 'a.
    _items: PhantomData<&'a T>,
}

impl<'a, T: PermissionObject> PermissionActionCheck<'a, T> {
    /// `prefix` is the `type:action` part; the id is appended per check.
    pub fn new(prefix: Permission, subject: &'a dyn Subject, interceptor: Interceptor<T>) -> Self {
        Self {
            prefix,
            subject,
            interceptor,
            _items: PhantomData,
        }
    }

    /// Check bound to the item with the given id.
    pub fn for_id(&self, id: &str) -> PermissionCheck<'a, T> {
        PermissionCheck::for_id(
            self.permission_string(Some(id)),
            self.subject,
            self.interceptor.clone(),
            id.to_string(),
        )
    }

    /// Check bound to `item`.
    pub fn for_item<'b>(&self, item: &'b T) -> PermissionCheck<'b, T>
    where
        'a: 'b,
    {
        PermissionCheck::for_item(
            self.item_permission_string(item),
            self.subject,
            self.interceptor.clone(),
            item,
        )
    }

    pub fn check(&self, id: &str) -> Result<(), AuthorizationError> {
        self.for_id(id).check()
    }

    pub fn check_item(&self, item: &T) -> Result<(), AuthorizationError> {
        self.for_item(item).check()
    }

    pub fn is_permitted(&self, id: &str) -> bool {
        self.for_id(id).is_permitted()
    }

    pub fn is_permitted_item(&self, item: &T) -> bool {
        self.for_item(item).is_permitted()
    }

    /// `type:action:id`; an absent id renders as the empty string.
    pub fn permission_string(&self, id: Option<&str>) -> Permission {
        self.prefix.scoped(id)
    }

    pub fn item_permission_string(&self, item: &T) -> Permission {
        self.prefix.scoped(Some(&*item.permission_id()))
    }
}

impl<T> PermissionActionCheck<'_, T> {
    pub fn prefix(&self) -> &Permission {
        &self.prefix
    }
}

impl<T> core::fmt::Debug for PermissionActionCheck<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PermissionActionCheck")
            .field("prefix", &self.prefix)
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::Principal;
    use proptest::prelude::*;

    struct Repository {
        id: Option<String>,
    }

    impl Repository {
        fn new(id: &str) -> Self {
            Self {
                id: Some(id.to_string()),
            }
        }
    }

    impl PermissionObject for Repository {
        fn id(&self) -> Option<Cow<'_, str>> {
            self.id.as_deref().map(Cow::Borrowed)
        }
    }

    fn principal() -> Principal {
        Principal::new()
            .with_grant("repository:create:abc")
            .unwrap()
            .with_grant("repository:delete:123")
            .unwrap()
    }

    fn action<'a>(subject: &'a Principal, prefix: &'static str) -> PermissionActionCheck<'a, Repository> {
        PermissionActionCheck::new(prefix.into(), subject, Interceptor::pass_through())
    }

    #[test]
    fn is_permitted_by_id_and_item() {
        let subject = principal();
        let create = action(&subject, "repository:create");
        assert!(create.is_permitted("abc"));
        assert!(create.is_permitted_item(&Repository::new("abc")));
        assert!(!create.is_permitted("123"));
        assert!(!create.is_permitted_item(&Repository::new("123")));
    }

    #[test]
    fn check_by_id_and_item() {
        let subject = principal();
        let delete = action(&subject, "repository:delete");
        assert_eq!(delete.check("123"), Ok(()));
        assert_eq!(delete.check_item(&Repository::new("123")), Ok(()));
    }

    #[test]
    fn check_with_invalid_id_and_item() {
        let subject = principal();
        let delete = action(&subject, "repository:delete");
        assert_eq!(
            delete.check("abc"),
            Err(AuthorizationError::forbidden("repository:delete:abc"))
        );
        assert!(delete.check_item(&Repository::new("abc")).is_err());
    }

    #[test]
    fn absent_id_renders_empty() {
        let subject = principal();
        let delete = action(&subject, "repository:delete");
        assert_eq!(delete.permission_string(None).as_str(), "repository:delete:");
        let draft = Repository { id: None };
        assert_eq!(delete.item_permission_string(&draft).as_str(), "repository:delete:");
        assert_eq!(delete.for_item(&draft).permission_string(), "repository:delete:");
    }

    proptest! {
        /// Without an item hook, item checks behave exactly like id checks
        /// with the item's identifier.
        #[test]
        fn item_default_matches_id_scope(id in "[a-z0-9]{0,8}", vetoed in "[a-z0-9]{0,8}") {
            let subject = Principal::new().with_grant("repository:read:*").unwrap();
            let blocked = vetoed.clone();
            let interceptor = Interceptor::pass_through()
                .on_test_id(move |_, id, probe| id != blocked && probe());
            let read = PermissionActionCheck::new("repository:read".into(), &subject, interceptor);

            let item = Repository::new(&id);
            prop_assert_eq!(read.is_permitted_item(&item), read.is_permitted(&id));
            prop_assert_eq!(
                read.item_permission_string(&item),
                read.permission_string(Some(id.as_str()))
            );
        }
    }
}
