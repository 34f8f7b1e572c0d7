use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Separator between the type, action and id parts of a permission string.
pub const SEPARATOR: &str = ":";

/// Fully-qualified permission string (`type:action[:id]`).
///
/// This is the token handed to the subject; it carries no matching logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        Self(value.into())
    }

    /// `type:action`
    pub fn of(type_id: &str, action: &str) -> Self {
        Self(Cow::Owned(format!("{type_id}{SEPARATOR}{action}")))
    }

    /// Appends an id part; an absent id becomes the empty string.
    pub fn scoped(&self, id: Option<&str>) -> Self {
        Self(Cow::Owned(format!(
            "{}{SEPARATOR}{}",
            self.0,
            id.unwrap_or_default()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}
