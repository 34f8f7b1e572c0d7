//! Guard table resolution.
//!
//! Every catalog action maps to exactly one guard, plus one reserved entry
//! ([`CUSTOM_KEY`]) used for custom actions outside the catalog.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{ActionCatalog, GuardBinding, GuardHandle, SchemaDiagnostic};

/// Reserved table key for custom actions.
pub const CUSTOM_KEY: &str = "__custom";

/// The guard responsible for one action.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedGuardEntry<G> {
    /// Upper-cased table key; used for generated identifiers.
    pub label: String,
    pub guard: G,
}

impl<G> ResolvedGuardEntry<G> {
    fn new(key: &str, guard: G) -> Self {
        Self {
            label: key.to_uppercase(),
            guard,
        }
    }
}

/// Total mapping from catalog action names and [`CUSTOM_KEY`] to guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardTable<G> {
    entries: IndexMap<String, ResolvedGuardEntry<G>>,
    custom: ResolvedGuardEntry<G>,
}

impl<G> GuardTable<G> {
    /// Entry stored under `key`. [`CUSTOM_KEY`] always resolves.
    pub fn get(&self, key: &str) -> Option<&ResolvedGuardEntry<G>> {
        if key == CUSTOM_KEY {
            return Some(&self.custom);
        }
        self.entries.get(key)
    }

    /// Entry for `action`, or the custom entry when the action is not in the
    /// catalog.
    pub fn resolve(&self, action: &str) -> &ResolvedGuardEntry<G> {
        self.entries.get(action).unwrap_or(&self.custom)
    }

    pub fn custom(&self) -> &ResolvedGuardEntry<G> {
        &self.custom
    }

    /// Catalog entries in declaration order, followed by the custom entry.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedGuardEntry<G>)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry))
            .chain(core::iter::once((CUSTOM_KEY, &self.custom)))
    }

    /// Number of keys, including [`CUSTOM_KEY`].
    pub fn len(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<G: Serialize> Serialize for GuardTable<G> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, entry) in self.iter() {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

/// Collects raw guard bindings for one type and resolves them against its
/// catalog.
#[derive(Debug, Clone)]
pub struct GuardTableBuilder<G> {
    bindings: Vec<GuardBinding<G>>,
}

impl<G> Default for GuardTableBuilder<G> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<G: GuardHandle> GuardTableBuilder<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration order matters: later bindings win.
    pub fn register(&mut self, binding: GuardBinding<G>) -> &mut Self {
        self.bindings.push(binding);
        self
    }

    pub fn bindings(&self) -> &[GuardBinding<G>] {
        &self.bindings
    }

    /// Resolves the table. Every overwrite or ignored binding is appended to
    /// `diagnostics`; none of them is an error here.
    pub fn build(
        &self,
        catalog: &ActionCatalog,
        diagnostics: &mut Vec<SchemaDiagnostic>,
    ) -> GuardTable<G> {
        let mut fallback: Option<&G> = None;
        let mut explicit: IndexMap<&str, &G> = IndexMap::new();

        for binding in &self.bindings {
            let Some(action) = binding.action.as_deref() else {
                if let Some(replaced) = fallback.replace(&binding.guard) {
                    diagnostics.push(SchemaDiagnostic::DuplicateFallbackGuard {
                        replaced: replaced.name().into_owned(),
                        by: binding.guard.name().into_owned(),
                    });
                }
                continue;
            };

            if !catalog.contains(action) {
                diagnostics.push(SchemaDiagnostic::UnmatchedGuardBinding {
                    action: action.to_string(),
                    guard: binding.guard.name().into_owned(),
                });
                continue;
            }

            if let Some(replaced) = explicit.insert(action, &binding.guard) {
                diagnostics.push(SchemaDiagnostic::DuplicateGuardBinding {
                    action: action.to_string(),
                    replaced: replaced.name().into_owned(),
                    by: binding.guard.name().into_owned(),
                });
            }
        }

        let fallback = fallback.cloned().unwrap_or_else(G::pass_through);

        let mut entries: IndexMap<String, ResolvedGuardEntry<G>> =
            IndexMap::with_capacity(catalog.len());
        for name in catalog.action_names() {
            if entries.contains_key(name) {
                continue;
            }
            let guard = match explicit.get(name) {
                Some(guard) => (*guard).clone(),
                None => fallback.clone(),
            };
            entries.insert(name.to_string(), ResolvedGuardEntry::new(name, guard));
        }

        GuardTable {
            entries,
            custom: ResolvedGuardEntry::new(CUSTOM_KEY, fallback),
        }
    }
}
