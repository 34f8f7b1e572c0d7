//! Interception protocol.
//!
//! An [`Interceptor`] has six decision points: three scopes (global, id,
//! item), each with a fail-fast form (`decide*`) and a boolean form
//! (`test*`). Every hook is optional; a missing hook runs the default:
//!
//! - global and id hooks call the delegate unchanged;
//! - item hooks forward to the id hook with the item's identifier.
//!
//! The two forms are evaluated independently. Overriding only one of them is
//! legal; [`Interceptor::asymmetries`] reports where that happened.

use std::sync::Arc;

use staticperm_core::{AuthorizationError, PermissionObject};

use crate::Subject;

/// The default fail-fast decision (asks the subject to require the permission).
pub type Delegate<'d> = &'d dyn Fn() -> Result<(), AuthorizationError>;

/// The default boolean decision (asks the subject whether it is permitted).
pub type Probe<'d> = &'d dyn Fn() -> bool;

type DecideHook =
    Arc<dyn Fn(&dyn Subject, Delegate<'_>) -> Result<(), AuthorizationError> + Send + Sync>;
type TestHook = Arc<dyn Fn(&dyn Subject, Probe<'_>) -> bool + Send + Sync>;
type DecideIdHook =
    Arc<dyn Fn(&dyn Subject, &str, Delegate<'_>) -> Result<(), AuthorizationError> + Send + Sync>;
type TestIdHook = Arc<dyn Fn(&dyn Subject, &str, Probe<'_>) -> bool + Send + Sync>;
type DecideItemHook<T> =
    Arc<dyn Fn(&dyn Subject, &T, Delegate<'_>) -> Result<(), AuthorizationError> + Send + Sync>;
type TestItemHook<T> = Arc<dyn Fn(&dyn Subject, &T, Probe<'_>) -> bool + Send + Sync>;

/// Scope of a decision point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HookScope {
    Global,
    Id,
    Item,
}

impl core::fmt::Display for HookScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            HookScope::Global => "global",
            HookScope::Id => "id",
            HookScope::Item => "item",
        })
    }
}

/// Form of a decision point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HookForm {
    FailFast,
    Boolean,
}

impl core::fmt::Display for HookForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            HookForm::FailFast => "fail-fast",
            HookForm::Boolean => "boolean",
        })
    }
}

/// A scope where only one of the two forms is overridden.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Asymmetry {
    pub scope: HookScope,
    pub overridden: HookForm,
}

/// Per-action interception hooks.
pub struct Interceptor<T> {
    decide: Option<DecideHook>,
    test: Option<TestHook>,
    decide_id: Option<DecideIdHook>,
    test_id: Option<TestIdHook>,
    decide_item: Option<DecideItemHook<T>>,
    test_item: Option<TestItemHook<T>>,
}

impl<T> Interceptor<T> {
    /// Interceptor that never changes the default decision.
    pub fn pass_through() -> Self {
        Self {
            decide: None,
            test: None,
            decide_id: None,
            test_id: None,
            decide_item: None,
            test_item: None,
        }
    }

    pub fn on_decide<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Subject, Delegate<'_>) -> Result<(), AuthorizationError> + Send + Sync + 'static,
    {
        self.decide = Some(Arc::new(hook));
        self
    }

    pub fn on_test<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Subject, Probe<'_>) -> bool + Send + Sync + 'static,
    {
        self.test = Some(Arc::new(hook));
        self
    }

    pub fn on_decide_id<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Subject, &str, Delegate<'_>) -> Result<(), AuthorizationError>
            + Send
            + Sync
            + 'static,
    {
        self.decide_id = Some(Arc::new(hook));
        self
    }

    pub fn on_test_id<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Subject, &str, Probe<'_>) -> bool + Send + Sync + 'static,
    {
        self.test_id = Some(Arc::new(hook));
        self
    }

    pub fn on_decide_item<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Subject, &T, Delegate<'_>) -> Result<(), AuthorizationError>
            + Send
            + Sync
            + 'static,
    {
        self.decide_item = Some(Arc::new(hook));
        self
    }

    pub fn on_test_item<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Subject, &T, Probe<'_>) -> bool + Send + Sync + 'static,
    {
        self.test_item = Some(Arc::new(hook));
        self
    }

    /// `(fail_fast, boolean)` override flags for `scope`.
    pub fn overrides(&self, scope: HookScope) -> (bool, bool) {
        match scope {
            HookScope::Global => (self.decide.is_some(), self.test.is_some()),
            HookScope::Id => (self.decide_id.is_some(), self.test_id.is_some()),
            HookScope::Item => (self.decide_item.is_some(), self.test_item.is_some()),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        [HookScope::Global, HookScope::Id, HookScope::Item]
            .into_iter()
            .all(|scope| self.overrides(scope) == (false, false))
    }

    /// Scopes where the fail-fast and boolean forms can disagree.
    pub fn asymmetries(&self) -> Vec<Asymmetry> {
        [HookScope::Global, HookScope::Id, HookScope::Item]
            .into_iter()
            .filter_map(|scope| match self.overrides(scope) {
                (true, false) => Some(Asymmetry {
                    scope,
                    overridden: HookForm::FailFast,
                }),
                (false, true) => Some(Asymmetry {
                    scope,
                    overridden: HookForm::Boolean,
                }),
                _ => None,
            })
            .collect()
    }
}

impl<T: PermissionObject> Interceptor<T> {
    /// Global fail-fast decision.
    pub fn decide(
        &self,
        subject: &dyn Subject,
        delegate: Delegate<'_>,
    ) -> Result<(), AuthorizationError> {
        match &self.decide {
            Some(hook) => hook(subject, delegate),
            None => delegate(),
        }
    }

    /// Global boolean decision.
    pub fn test(&self, subject: &dyn Subject, probe: Probe<'_>) -> bool {
        match &self.test {
            Some(hook) => hook(subject, probe),
            None => probe(),
        }
    }

    pub fn decide_id(
        &self,
        subject: &dyn Subject,
        id: &str,
        delegate: Delegate<'_>,
    ) -> Result<(), AuthorizationError> {
        match &self.decide_id {
            Some(hook) => hook(subject, id, delegate),
            None => delegate(),
        }
    }

    pub fn test_id(&self, subject: &dyn Subject, id: &str, probe: Probe<'_>) -> bool {
        match &self.test_id {
            Some(hook) => hook(subject, id, probe),
            None => probe(),
        }
    }

    /// Without an item hook this is [`decide_id`](Self::decide_id) with the
    /// item's identifier.
    pub fn decide_item(
        &self,
        subject: &dyn Subject,
        item: &T,
        delegate: Delegate<'_>,
    ) -> Result<(), AuthorizationError> {
        match &self.decide_item {
            Some(hook) => hook(subject, item, delegate),
            None => self.decide_id(subject, &item.permission_id(), delegate),
        }
    }

    /// Without an item hook this is [`test_id`](Self::test_id) with the
    /// item's identifier.
    pub fn test_item(&self, subject: &dyn Subject, item: &T, probe: Probe<'_>) -> bool {
        match &self.test_item {
            Some(hook) => hook(subject, item, probe),
            None => self.test_id(subject, &item.permission_id(), probe),
        }
    }
}

impl<T> Default for Interceptor<T> {
    fn default() -> Self {
        Self::pass_through()
    }
}

impl<T> Clone for Interceptor<T> {
    fn clone(&self) -> Self {
        Self {
            decide: self.decide.clone(),
            test: self.test.clone(),
            decide_id: self.decide_id.clone(),
            test_id: self.test_id.clone(),
            decide_item: self.decide_item.clone(),
            test_item: self.test_item.clone(),
        }
    }
}

impl<T> core::fmt::Debug for Interceptor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Interceptor")
            .field("global", &self.overrides(HookScope::Global))
            .field("id", &self.overrides(HookScope::Id))
            .field("item", &self.overrides(HookScope::Item))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::cell::Cell;

    use super::*;
    use staticperm_core::Permission;

    struct Nobody;

    impl Subject for Nobody {
        fn is_permitted(&self, _: &Permission) -> bool {
            false
        }
    }

    struct Repo(&'static str);

    impl PermissionObject for Repo {
        fn id(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }
    }

    #[test]
    fn pass_through_calls_each_delegate_once() {
        let interceptor = Interceptor::<Repo>::pass_through();
        let calls = Cell::new(0);
        let delegate = || -> Result<(), AuthorizationError> {
            calls.set(calls.get() + 1);
            Err(AuthorizationError::forbidden("x"))
        };
        let probe = || {
            calls.set(calls.get() + 1);
            true
        };

        assert!(interceptor.decide(&Nobody, &delegate).is_err());
        assert!(interceptor.decide_id(&Nobody, "1", &delegate).is_err());
        assert!(interceptor.decide_item(&Nobody, &Repo("1"), &delegate).is_err());
        assert!(interceptor.test(&Nobody, &probe));
        assert!(interceptor.test_id(&Nobody, "1", &probe));
        assert!(interceptor.test_item(&Nobody, &Repo("1"), &probe));
        assert_eq!(calls.get(), 6);
        assert!(interceptor.is_pass_through());
    }

    #[test]
    fn item_default_forwards_item_id_to_id_hook() {
        let interceptor = Interceptor::<Repo>::pass_through()
            .on_test_id(|_, id, probe| id != "locked" && probe())
            .on_decide_id(|_, id, delegate| {
                if id == "locked" {
                    Err(AuthorizationError::denied(id, "locked"))
                } else {
                    delegate()
                }
            });

        assert!(!interceptor.test_item(&Nobody, &Repo("locked"), &|| true));
        assert!(interceptor.test_item(&Nobody, &Repo("open"), &|| true));
        assert_eq!(
            interceptor.decide_item(&Nobody, &Repo("locked"), &|| Ok::<(), AuthorizationError>(())),
            Err(AuthorizationError::denied("locked", "locked"))
        );
    }

    #[test]
    fn item_hook_takes_precedence() {
        let interceptor = Interceptor::<Repo>::pass_through()
            .on_test_id(|_, _, _| false)
            .on_test_item(|_, _, _| true);

        assert!(interceptor.test_item(&Nobody, &Repo("1"), &|| false));
        assert!(!interceptor.test_id(&Nobody, "1", &|| true));
    }

    #[test]
    fn one_sided_overrides_are_reported() {
        let interceptor = Interceptor::<Repo>::pass_through()
            .on_decide(|_, _| Ok(()))
            .on_test_id(|_, _, _| true)
            .on_decide_id(|_, _, delegate| delegate())
            .on_test_item(|_, _, probe| probe());

        assert_eq!(
            interceptor.asymmetries(),
            vec![
                Asymmetry {
                    scope: HookScope::Global,
                    overridden: HookForm::FailFast,
                },
                Asymmetry {
                    scope: HookScope::Item,
                    overridden: HookForm::Boolean,
                },
            ]
        );
        assert!(!interceptor.is_pass_through());
    }
}
