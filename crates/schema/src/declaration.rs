//! Per-type declaration input, as produced by metadata extraction.

use serde::{Deserialize, Serialize};

use staticperm_core::SchemaResult;

use crate::{BuildOptions, GuardBinding, GuardRef, ModelBuilder, PermissionSchemaModel};

fn default_item_actions() -> Vec<String> {
    vec!["read".to_string(), "modify".to_string(), "delete".to_string()]
}

fn default_global_actions() -> Vec<String> {
    vec!["create".to_string()]
}

/// Permission declaration of one domain type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDeclaration {
    /// Type part of every permission string (e.g. `"repositories"`).
    pub type_id: String,

    #[serde(default = "default_item_actions")]
    pub item_actions: Vec<String>,

    #[serde(default = "default_global_actions")]
    pub global_actions: Vec<String>,

    #[serde(default)]
    pub allow_custom_item: bool,

    #[serde(default)]
    pub allow_custom_global: bool,

    #[serde(default)]
    pub guards: Vec<GuardDeclaration>,
}

/// A guard and the actions it is declared for.
///
/// An empty `guarded_actions` list declares the wildcard fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardDeclaration {
    pub guard: GuardRef,

    #[serde(default)]
    pub guarded_actions: Vec<String>,
}

impl GuardDeclaration {
    /// One binding per guarded action, or a single fallback binding.
    pub fn bindings(&self) -> Vec<GuardBinding<GuardRef>> {
        if self.guarded_actions.is_empty() {
            return vec![GuardBinding::fallback(self.guard.clone())];
        }
        self.guarded_actions
            .iter()
            .map(|action| GuardBinding::for_action(action.clone(), self.guard.clone()))
            .collect()
    }
}

impl PermissionDeclaration {
    /// Declaration with the default catalog and no guards.
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            item_actions: default_item_actions(),
            global_actions: default_global_actions(),
            allow_custom_item: false,
            allow_custom_global: false,
            guards: Vec::new(),
        }
    }

    pub fn builder(&self) -> ModelBuilder<GuardRef> {
        let builder = ModelBuilder::new(self.type_id.clone())
            .item_actions(self.item_actions.iter().cloned())
            .global_actions(self.global_actions.iter().cloned())
            .allow_custom_item(self.allow_custom_item)
            .allow_custom_global(self.allow_custom_global);

        self.guards
            .iter()
            .flat_map(GuardDeclaration::bindings)
            .fold(builder, ModelBuilder::bind)
    }

    pub fn build(&self, options: BuildOptions) -> SchemaResult<PermissionSchemaModel<GuardRef>> {
        self.builder().options(options).build()
    }
}
