//! Seam between metadata extraction and model assembly.

use std::path::Path;

use serde::Deserialize;

use crate::PermissionDeclaration;

/// Anything that can enumerate the permission declarations of a code base.
///
/// The builder only ever sees the declarations, never the mechanism that
/// discovered them.
pub trait SchemaSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn declarations(&self) -> Result<Vec<PermissionDeclaration>, Self::Error>;
}

/// Declarations kept as JSON: either one object or an array of them.
#[derive(Debug, Clone)]
pub struct JsonSchemaSource {
    text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(PermissionDeclaration),
    Many(Vec<PermissionDeclaration>),
}

impl JsonSchemaSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }
}

impl SchemaSource for JsonSchemaSource {
    type Error = serde_json::Error;

    fn declarations(&self) -> Result<Vec<PermissionDeclaration>, Self::Error> {
        Ok(match serde_json::from_str(&self.text)? {
            OneOrMany::One(declaration) => vec![declaration],
            OneOrMany::Many(declarations) => declarations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildOptions;

    #[test]
    fn accepts_single_object_and_array() {
        let one = JsonSchemaSource::new(r#"{"typeId": "a"}"#);
        assert_eq!(one.declarations().unwrap().len(), 1);

        let many = JsonSchemaSource::new(r#"[{"typeId": "a"}, {"typeId": "b"}]"#);
        let types: Vec<_> = many
            .declarations()
            .unwrap()
            .into_iter()
            .map(|d| d.type_id)
            .collect();
        assert_eq!(types, vec!["a", "b"]);
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(JsonSchemaSource::new(r#"{"itemActions": []}"#).declarations().is_err());
    }

    #[test]
    fn bundled_fixture_builds() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/repositories.json");
        let declarations = JsonSchemaSource::from_path(path)
            .unwrap()
            .declarations()
            .unwrap();
        assert_eq!(declarations.len(), 2);

        let repositories = declarations[0].build(BuildOptions::strict()).unwrap();
        assert_eq!(
            repositories.guard_for("delete").guard.as_str(),
            "ProtectedRepositoryGuard"
        );
        assert!(repositories.guard_for("read").guard.is_pass_through());

        let groups = declarations[1].build(BuildOptions::default()).unwrap();
        assert_eq!(groups.guard_for("join").guard.as_str(), "GroupGuard");
        assert_eq!(groups.guard_table().custom().guard.as_str(), "GroupGuard");
    }
}
