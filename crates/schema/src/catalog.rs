//! Ordered, de-duplicated action lists for one domain type.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use staticperm_core::SchemaResult;

use crate::Action;

/// Which accessor family an action belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionScope {
    /// Checked against a specific item (`type:action:id`).
    Item,
    /// Checked without an item (`type:action`).
    Global,
}

impl ActionScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionScope::Item => "item",
            ActionScope::Global => "global",
        }
    }
}

impl core::fmt::Display for ActionScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item and global actions of a type.
///
/// Insertion is insert-or-overwrite by name: iteration keeps the position of
/// the first declaration, the value is the last one written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCatalog {
    item: IndexMap<String, Action>,
    global: IndexMap<String, Action>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item action. Returns the action it replaced, if any.
    pub fn add_item_action(&mut self, name: &str) -> SchemaResult<Option<Action>> {
        self.add(ActionScope::Item, name)
    }

    /// Adds a global action. Returns the action it replaced, if any.
    pub fn add_global_action(&mut self, name: &str) -> SchemaResult<Option<Action>> {
        self.add(ActionScope::Global, name)
    }

    pub fn add(&mut self, scope: ActionScope, name: &str) -> SchemaResult<Option<Action>> {
        let action = Action::new(name)?;
        let actions = match scope {
            ActionScope::Item => &mut self.item,
            ActionScope::Global => &mut self.global,
        };
        Ok(actions.insert(action.name().to_string(), action))
    }

    pub fn item_actions(&self) -> impl Iterator<Item = &Action> {
        self.item.values()
    }

    pub fn global_actions(&self) -> impl Iterator<Item = &Action> {
        self.global.values()
    }

    pub fn item_action(&self, name: &str) -> Option<&Action> {
        self.item.get(name)
    }

    pub fn global_action(&self, name: &str) -> Option<&Action> {
        self.global.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.item.contains_key(name) || self.global.contains_key(name)
    }

    /// Item names first, then global names. A name declared in both
    /// scopes is yielded twice.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.item.keys().chain(self.global.keys()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.item.len() + self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_empty() && self.global.is_empty()
    }
}

impl Serialize for ActionCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionCatalog", 2)?;
        state.serialize_field("itemActions", &self.item.values().collect::<Vec<_>>())?;
        state.serialize_field("globalActions", &self.global.values().collect::<Vec<_>>())?;
        state.end()
    }
}
