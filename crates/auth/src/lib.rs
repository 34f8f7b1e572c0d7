//! `staticperm-auth`: runtime permission checks with guard interception.
//!
//! A check combines a permission string, a [`Subject`] that answers it, and an
//! [`Interceptor`] produced by the guard resolved for the action. Callers never
//! need to know whether a guard is installed.

pub mod action_check;
pub mod check;
pub mod guard;
pub mod interceptor;
mod macros;
pub mod principal;
pub mod subject;
pub mod surface;
pub mod wildcard;

pub use action_check::PermissionActionCheck;
pub use check::PermissionCheck;
pub use guard::{Guard, PassThroughGuard, PermissionGuard};
pub use interceptor::{Asymmetry, Delegate, HookForm, HookScope, Interceptor, Probe};
pub use principal::Principal;
pub use subject::Subject;
pub use surface::{GuardLint, PermissionSurface};
pub use wildcard::{WildcardParseError, WildcardPermission};

pub use staticperm_core::{
    AuthorizationError, Permission, PermissionObject, SEPARATOR, SchemaError, SchemaResult,
};
pub use staticperm_schema::{GuardBinding, ModelBuilder, PermissionSchemaModel};
