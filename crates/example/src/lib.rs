//! Repository permissions, declared with `static_permissions!`.
//!
//! A small domain showing item and global actions, custom actions and a guard
//! that protects a single repository from deletion.

pub mod repository;

pub use repository::{
    PROTECTED_REPOSITORY, ProtectedRepositoryGuard, Repository, RepositoryPermissions,
    repository_permissions,
};
