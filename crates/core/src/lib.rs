//! `staticperm-core`: primitives shared by schema assembly and runtime checks.
//!
//! This crate is intentionally free of guard logic and of any concrete
//! authorization backend.

pub mod error;
pub mod object;
pub mod permission;

pub use error::{AuthorizationError, SchemaError, SchemaResult};
pub use object::PermissionObject;
pub use permission::{Permission, SEPARATOR};
