//! Error model for schema assembly (build time) and authorization (runtime).

use thiserror::Error;

/// Result type used by schema assembly.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Build-time failure. Fatal to generation for the affected type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The permission type identifier is empty.
    #[error("type identifier must not be empty")]
    EmptyTypeId,

    /// The type identifier cannot be embedded in a permission string.
    #[error("invalid type identifier '{type_id}': {reason}")]
    InvalidTypeId { type_id: String, reason: String },

    /// An action was declared with an empty name.
    #[error("action name must not be empty")]
    EmptyActionName,

    /// An action name cannot be embedded in a permission string.
    #[error("invalid action name '{name}': {reason}")]
    InvalidActionName { name: String, reason: String },

    /// A declared-action accessor was asked for a name the catalog does not know.
    #[error("action '{action}' is not declared for type '{type_id}'")]
    UnknownAction { type_id: String, action: String },

    /// A custom action was requested although the type does not allow it.
    #[error("custom {scope} actions are not enabled for type '{type_id}'")]
    CustomActionsDisabled { type_id: String, scope: &'static str },

    /// A build diagnostic was promoted to an error by strict mode.
    #[error("strict schema validation failed: {0}")]
    Strict(String),
}

impl SchemaError {
    pub fn invalid_type_id(type_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTypeId {
            type_id: type_id.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_action(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidActionName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_action(type_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self::UnknownAction {
            type_id: type_id.into(),
            action: action.into(),
        }
    }

    pub fn custom_disabled(type_id: impl Into<String>, scope: &'static str) -> Self {
        Self::CustomActionsDisabled {
            type_id: type_id.into(),
            scope,
        }
    }
}

/// Runtime authorization failure.
///
/// Raised either by the subject (oracle) or by a guard's fail-fast hook and
/// always handed back to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The subject lacks the permission.
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    /// A guard vetoed the check.
    #[error("denied by guard for '{permission}': {reason}")]
    Denied { permission: String, reason: String },
}

impl AuthorizationError {
    pub fn forbidden(permission: impl Into<String>) -> Self {
        Self::Forbidden(permission.into())
    }

    pub fn denied(permission: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Denied {
            permission: permission.into(),
            reason: reason.into(),
        }
    }

    /// Permission string the failure refers to.
    pub fn permission(&self) -> &str {
        match self {
            Self::Forbidden(permission) => permission,
            Self::Denied { permission, .. } => permission,
        }
    }
}
