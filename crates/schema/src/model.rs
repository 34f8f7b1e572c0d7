//! The permission schema model: the only input to code generation.

use serde::Serialize;

use staticperm_core::{SEPARATOR, SchemaError, SchemaResult};

use crate::{
    Action, ActionCatalog, ActionScope, BuildOptions, GuardBinding, GuardHandle, GuardTable,
    GuardTableBuilder, ResolvedGuardEntry, SchemaDiagnostic,
};

/// Immutable aggregate of everything generation needs for one type.
///
/// Only [`ModelBuilder::build`] creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSchemaModel<G> {
    type_id: String,
    #[serde(flatten)]
    catalog: ActionCatalog,
    allow_custom_item: bool,
    allow_custom_global: bool,
    guard_table: GuardTable<G>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<SchemaDiagnostic>,
}

impl<G: GuardHandle> PermissionSchemaModel<G> {
    pub fn builder(type_id: impl Into<String>) -> ModelBuilder<G> {
        ModelBuilder::new(type_id)
    }
}

impl<G> PermissionSchemaModel<G> {
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn item_actions(&self) -> impl Iterator<Item = &Action> {
        self.catalog.item_actions()
    }

    pub fn global_actions(&self) -> impl Iterator<Item = &Action> {
        self.catalog.global_actions()
    }

    pub fn allow_custom_item(&self) -> bool {
        self.allow_custom_item
    }

    pub fn allow_custom_global(&self) -> bool {
        self.allow_custom_global
    }

    pub fn allows_custom(&self, scope: ActionScope) -> bool {
        match scope {
            ActionScope::Item => self.allow_custom_item,
            ActionScope::Global => self.allow_custom_global,
        }
    }

    pub fn guard_table(&self) -> &GuardTable<G> {
        &self.guard_table
    }

    /// Guard entry for `action`; names outside the catalog get the custom entry.
    pub fn guard_for(&self, action: &str) -> &ResolvedGuardEntry<G> {
        self.guard_table.resolve(action)
    }

    /// Last-write-wins decisions taken while building.
    pub fn diagnostics(&self) -> &[SchemaDiagnostic] {
        &self.diagnostics
    }
}

/// Collects the declaration of one type. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ModelBuilder<G> {
    type_id: String,
    actions: Vec<(ActionScope, String)>,
    allow_custom_item: bool,
    allow_custom_global: bool,
    guards: GuardTableBuilder<G>,
    options: BuildOptions,
}

impl<G: GuardHandle> ModelBuilder<G> {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            actions: Vec::new(),
            allow_custom_item: false,
            allow_custom_global: false,
            guards: GuardTableBuilder::new(),
            options: BuildOptions::default(),
        }
    }

    pub fn item_action(mut self, name: impl Into<String>) -> Self {
        self.actions.push((ActionScope::Item, name.into()));
        self
    }

    pub fn global_action(mut self, name: impl Into<String>) -> Self {
        self.actions.push((ActionScope::Global, name.into()));
        self
    }

    pub fn item_actions<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.item_action(name))
    }

    pub fn global_actions<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.global_action(name))
    }

    pub fn allow_custom_item(mut self, allow: bool) -> Self {
        self.allow_custom_item = allow;
        self
    }

    pub fn allow_custom_global(mut self, allow: bool) -> Self {
        self.allow_custom_global = allow;
        self
    }

    pub fn bind(mut self, binding: GuardBinding<G>) -> Self {
        self.guards.register(binding);
        self
    }

    pub fn guard(self, action: impl Into<String>, guard: G) -> Self {
        self.bind(GuardBinding::for_action(action, guard))
    }

    pub fn fallback_guard(self, guard: G) -> Self {
        self.bind(GuardBinding::fallback(guard))
    }

    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Assembles the model.
    ///
    /// Fails on an empty or invalid type id or an invalid action name, and in strict
    /// mode on the first diagnostic.
    pub fn build(self) -> SchemaResult<PermissionSchemaModel<G>> {
        validate_type_id(&self.type_id)?;

        let mut catalog = ActionCatalog::new();
        let mut diagnostics = Vec::new();
        for (scope, name) in &self.actions {
            if catalog.add(*scope, name)?.is_some() {
                diagnostics.push(SchemaDiagnostic::DuplicateAction {
                    scope: *scope,
                    action: name.clone(),
                });
            }
        }

        let guard_table = self.guards.build(&catalog, &mut diagnostics);

        for diagnostic in &diagnostics {
            tracing::warn!(type_id = %self.type_id, %diagnostic, "permission schema diagnostic");
        }
        if self.options.strict
            && let Some(first) = diagnostics.first()
        {
            return Err(SchemaError::Strict(first.to_string()));
        }

        tracing::debug!(
            type_id = %self.type_id,
            actions = catalog.len(),
            guards = guard_table.len(),
            "permission schema model assembled"
        );

        Ok(PermissionSchemaModel {
            type_id: self.type_id,
            catalog,
            allow_custom_item: self.allow_custom_item,
            allow_custom_global: self.allow_custom_global,
            guard_table,
            diagnostics,
        })
    }
}

fn validate_type_id(type_id: &str) -> SchemaResult<()> {
    if type_id.trim().is_empty() {
        return Err(SchemaError::EmptyTypeId);
    }
    if type_id.contains(SEPARATOR) {
        return Err(SchemaError::invalid_type_id(
            type_id,
            format!("must not contain the separator '{SEPARATOR}'"),
        ));
    }
    if type_id.chars().any(char::is_whitespace) {
        return Err(SchemaError::invalid_type_id(type_id, "must not contain whitespace"));
    }
    Ok(())
}
