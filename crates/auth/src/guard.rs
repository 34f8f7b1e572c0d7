//! Guard factories.
//!
//! A guard is asked once per action for an [`Interceptor`]; the interceptor
//! is never shared between action names.

use std::borrow::Cow;
use std::sync::Arc;

use staticperm_schema::{GuardHandle, PASS_THROUGH_GUARD};

use crate::Interceptor;

/// Produces the interceptor for one action of type `T`.
pub trait PermissionGuard<T>: Send + Sync {
    fn intercept(&self, action: &str) -> Interceptor<T>;
}

/// Guard that never changes the default decision.
#[derive(Debug, Copy, Clone, Default)]
pub struct PassThroughGuard;

impl<T> PermissionGuard<T> for PassThroughGuard {
    fn intercept(&self, _action: &str) -> Interceptor<T> {
        Interceptor::pass_through()
    }
}

struct FnGuard<F>(F);

impl<T, F> PermissionGuard<T> for FnGuard<F>
where
    F: Fn(&str) -> Interceptor<T> + Send + Sync,
{
    fn intercept(&self, action: &str) -> Interceptor<T> {
        (self.0)(action)
    }
}

/// Shareable guard value stored in the guard table.
pub struct Guard<T> {
    name: Cow<'static, str>,
    factory: Arc<dyn PermissionGuard<T>>,
}

impl<T> Guard<T> {
    /// Wraps a guard, named after its type.
    pub fn new<G>(guard: G) -> Self
    where
        G: PermissionGuard<T> + 'static,
    {
        Self::named(short_type_name::<G>(), guard)
    }

    pub fn named<G>(name: impl Into<Cow<'static, str>>, guard: G) -> Self
    where
        G: PermissionGuard<T> + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(guard),
        }
    }

    /// Guard from a function of the action name.
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, factory: F) -> Self
    where
        F: Fn(&str) -> Interceptor<T> + Send + Sync + 'static,
    {
        Self::named(name, FnGuard(factory))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intercept(&self, action: &str) -> Interceptor<T> {
        self.factory.intercept(action)
    }
}

/// `type_name` without module path or generic arguments.
fn short_type_name<G>() -> String {
    let name = std::any::type_name::<G>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> core::fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Guard").field(&self.name).finish()
    }
}

impl<T> GuardHandle for Guard<T> {
    fn pass_through() -> Self {
        Self::named(PASS_THROUGH_GUARD, PassThroughGuard)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
