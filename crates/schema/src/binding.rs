//! Raw guard declarations and the handle type used to name a guard factory.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Name under which the built-in pass-through guard is referenced.
pub const PASS_THROUGH_GUARD: &str = "PassThroughGuard";

/// A reference to a guard factory as stored in the guard table.
///
/// Generation works with [`GuardRef`] identifiers; the runtime surface uses
/// handles that carry the factory itself.
pub trait GuardHandle: Clone {
    /// The fallback used when a type declares no wildcard guard.
    fn pass_through() -> Self;

    /// Human-readable name, used in diagnostics.
    fn name(&self) -> Cow<'_, str>;
}

/// Guard factory identified by name (e.g. a path the emitter will reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuardRef(String);

impl GuardRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_pass_through(&self) -> bool {
        self.0 == PASS_THROUGH_GUARD
    }
}

impl GuardHandle for GuardRef {
    fn pass_through() -> Self {
        Self::new(PASS_THROUGH_GUARD)
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

impl core::fmt::Display for GuardRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One guard declaration: either for a named action or, with no action, the
/// wildcard fallback for the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardBinding<G> {
    pub action: Option<String>,
    pub guard: G,
}

impl<G> GuardBinding<G> {
    pub fn for_action(action: impl Into<String>, guard: G) -> Self {
        Self {
            action: Some(action.into()),
            guard,
        }
    }

    pub fn fallback(guard: G) -> Self {
        Self {
            action: None,
            guard,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.action.is_none()
    }
}
