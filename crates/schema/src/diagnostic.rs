//! Findings recorded while assembling a model.
//!
//! None of these change the result: every one of them describes a
//! last-write-wins decision or an ignored declaration.

use serde::Serialize;

use crate::ActionScope;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaDiagnostic {
    /// The same action was declared twice in one scope.
    DuplicateAction { scope: ActionScope, action: String },

    /// Two explicit bindings target the same action; `by` is effective.
    DuplicateGuardBinding {
        action: String,
        replaced: String,
        by: String,
    },

    /// More than one wildcard binding; `by` is effective.
    DuplicateFallbackGuard { replaced: String, by: String },

    /// An explicit binding names an action the catalog does not declare.
    UnmatchedGuardBinding { action: String, guard: String },
}

impl core::fmt::Display for SchemaDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DuplicateAction { scope, action } => {
                write!(f, "{scope} action '{action}' is declared more than once")
            }
            Self::DuplicateGuardBinding {
                action,
                replaced,
                by,
            } => write!(
                f,
                "guard '{by}' replaces guard '{replaced}' for action '{action}'"
            ),
            Self::DuplicateFallbackGuard { replaced, by } => {
                write!(f, "fallback guard '{by}' replaces fallback guard '{replaced}'")
            }
            Self::UnmatchedGuardBinding { action, guard } => write!(
                f,
                "guard '{guard}' is bound to undeclared action '{action}' and is ignored"
            ),
        }
    }
}
