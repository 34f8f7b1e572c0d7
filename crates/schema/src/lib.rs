//! `staticperm-schema`: assembles the permission schema model for one domain type.
//!
//! Input is a declaration (catalog of actions plus guard bindings), output is an
//! immutable [`PermissionSchemaModel`] with a total action→guard table. Source
//! rendering is left to whatever consumes the model.

pub mod action;
pub mod binding;
pub mod catalog;
pub mod config;
pub mod declaration;
pub mod diagnostic;
pub mod model;
pub mod source;
pub mod table;

pub use action::Action;
pub use binding::{GuardBinding, GuardHandle, GuardRef, PASS_THROUGH_GUARD};
pub use catalog::{ActionCatalog, ActionScope};
pub use config::BuildOptions;
pub use declaration::{GuardDeclaration, PermissionDeclaration};
pub use diagnostic::SchemaDiagnostic;
pub use model::{ModelBuilder, PermissionSchemaModel};
pub use source::{JsonSchemaSource, SchemaSource};
pub use table::{CUSTOM_KEY, GuardTable, GuardTableBuilder, ResolvedGuardEntry};
