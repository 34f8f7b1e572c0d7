use serde::Serialize;

use staticperm_core::{SEPARATOR, SchemaError, SchemaResult};

use crate::CUSTOM_KEY;

/// A named operation on a domain type.
///
/// `constant` is the upper-cased name and only matters for generated
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Action {
    name: String,
    constant: String,
}

impl Action {
    /// Validates `name` and derives its constant.
    pub fn new(name: impl Into<String>) -> SchemaResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        let constant = name.to_uppercase();
        Ok(Self { name, constant })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constant(&self) -> &str {
        &self.constant
    }
}

/// Rejects names that cannot be embedded as one part of a permission string,
/// and the reserved [`CUSTOM_KEY`].
pub fn validate_name(name: &str) -> SchemaResult<()> {
    if name.is_empty() {
        return Err(SchemaError::EmptyActionName);
    }
    if name.contains(SEPARATOR) {
        return Err(SchemaError::invalid_action(
            name,
            format!("must not contain the separator '{SEPARATOR}'"),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(SchemaError::invalid_action(name, "must not contain whitespace"));
    }
    if name == CUSTOM_KEY {
        return Err(SchemaError::invalid_action(name, "reserved for custom actions"));
    }
    Ok(())
}
