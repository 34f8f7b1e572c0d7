//! Runtime accessor surface for one domain type.

use staticperm_core::{Permission, PermissionObject, SchemaError, SchemaResult};
use staticperm_schema::{ActionScope, CUSTOM_KEY, PermissionSchemaModel, action::validate_name};

use crate::{Asymmetry, Guard, Interceptor, PermissionActionCheck, PermissionCheck, Subject};

/// A guard whose interceptor overrides only one form of a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardLint {
    pub action: String,
    pub guard: String,
    pub asymmetry: Asymmetry,
}

impl core::fmt::Display for GuardLint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "guard '{}' overrides only the {} {} hook for action '{}'",
            self.guard, self.asymmetry.overridden, self.asymmetry.scope, self.action
        )
    }
}

/// Hands out checks for the actions of one type, each wired to the guard the
/// model resolved for it.
#[derive(Debug)]
pub struct PermissionSurface<T> {
    model: PermissionSchemaModel<Guard<T>>,
}

impl<T: PermissionObject> PermissionSurface<T> {
    /// Wraps `model`; guard lint findings are logged as warnings.
    pub fn new(model: PermissionSchemaModel<Guard<T>>) -> Self {
        let surface = Self { model };
        for lint in surface.lint() {
            tracing::warn!(type_id = %surface.type_id(), %lint, "inconsistent guard");
        }
        surface
    }

    pub fn model(&self) -> &PermissionSchemaModel<Guard<T>> {
        &self.model
    }

    pub fn type_id(&self) -> &str {
        self.model.type_id()
    }

    /// Fresh interceptor from the guard resolved for `action`.
    pub fn interceptor(&self, action: &str) -> Interceptor<T> {
        self.model.guard_for(action).guard.intercept(action)
    }

    /// Check for a declared global action.
    pub fn global<'a>(
        &self,
        subject: &'a dyn Subject,
        action: &str,
    ) -> SchemaResult<PermissionCheck<'a, T>> {
        if self.model.catalog().global_action(action).is_none() {
            return Err(SchemaError::unknown_action(self.type_id(), action));
        }
        Ok(self.declared_global(subject, action))
    }

    /// Checks for a declared item action.
    pub fn item<'a>(
        &self,
        subject: &'a dyn Subject,
        action: &str,
    ) -> SchemaResult<PermissionActionCheck<'a, T>> {
        if self.model.catalog().item_action(action).is_none() {
            return Err(SchemaError::unknown_action(self.type_id(), action));
        }
        Ok(self.declared_item(subject, action))
    }

    /// Global check for an arbitrary action name.
    pub fn custom<'a>(
        &self,
        subject: &'a dyn Subject,
        action: &str,
    ) -> SchemaResult<PermissionCheck<'a, T>> {
        self.ensure_custom(ActionScope::Global, action)?;
        Ok(self.declared_global(subject, action))
    }

    /// Item checks for an arbitrary action name.
    pub fn custom_item<'a>(
        &self,
        subject: &'a dyn Subject,
        action: &str,
    ) -> SchemaResult<PermissionActionCheck<'a, T>> {
        self.ensure_custom(ActionScope::Item, action)?;
        Ok(self.declared_item(subject, action))
    }

    /// Unchecked global accessor; `action` must come from the catalog.
    #[doc(hidden)]
    pub fn declared_global<'a>(&self, subject: &'a dyn Subject, action: &str) -> PermissionCheck<'a, T> {
        PermissionCheck::new(
            Permission::of(self.type_id(), action),
            subject,
            self.interceptor(action),
        )
    }

    /// Unchecked item accessor; `action` must come from the catalog.
    #[doc(hidden)]
    pub fn declared_item<'a>(
        &self,
        subject: &'a dyn Subject,
        action: &str,
    ) -> PermissionActionCheck<'a, T> {
        PermissionActionCheck::new(
            Permission::of(self.type_id(), action),
            subject,
            self.interceptor(action),
        )
    }

    fn ensure_custom(&self, scope: ActionScope, action: &str) -> SchemaResult<()> {
        if !self.model.allows_custom(scope) {
            return Err(SchemaError::custom_disabled(self.type_id(), scope.as_str()));
        }
        validate_name(action)
    }

    /// One entry per catalog action whose interceptor overrides exactly one
    /// form of a hook scope.
    pub fn lint(&self) -> Vec<GuardLint> {
        self.model
            .guard_table()
            .iter()
            .filter(|(action, _)| *action != CUSTOM_KEY)
            .flat_map(|(action, entry)| {
                entry
                    .guard
                    .intercept(action)
                    .asymmetries()
                    .into_iter()
                    .map(move |asymmetry| GuardLint {
                        action: action.to_string(),
                        guard: entry.guard.name().to_string(),
                        asymmetry,
                    })
            })
            .collect()
    }
}
