//! In-memory subject backed by a list of wildcard grants.

use serde::{Deserialize, Serialize};

use staticperm_core::Permission;

use crate::{Subject, WildcardParseError, WildcardPermission};

/// A principal and the grants it holds.
///
/// Deserializes from `{"grants": ["repositories:read:*", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default)]
    pub grants: Vec<WildcardPermission>,
}

impl Principal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and adds a grant.
    pub fn with_grant(mut self, grant: &str) -> Result<Self, WildcardParseError> {
        self.grants.push(WildcardPermission::parse(grant)?);
        Ok(self)
    }

    pub fn grant(&mut self, grant: WildcardPermission) {
        self.grants.push(grant);
    }
}

impl Subject for Principal {
    fn is_permitted(&self, permission: &Permission) -> bool {
        let permitted = self
            .grants
            .iter()
            .any(|grant| grant.implies(permission.as_str()));
        tracing::trace!(
            grants = self.grants.len(),
            %permission,
            permitted,
            "subject evaluated permission"
        );
        permitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staticperm_core::AuthorizationError;

    #[test]
    fn principal_without_grants_is_denied() {
        let principal = Principal::new();
        let permission = Permission::from("repositories:create");
        assert!(!principal.is_permitted(&permission));
        assert_eq!(
            principal.require_permission(&permission),
            Err(AuthorizationError::forbidden("repositories:create"))
        );
    }

    #[test]
    fn grants_are_consulted() {
        let principal = Principal::new()
            .with_grant("repositories:create")
            .unwrap()
            .with_grant("repositories:delete:1234")
            .unwrap();

        assert!(principal.is_permitted(&"repositories:create".into()));
        assert!(principal.is_permitted(&"repositories:delete:1234".into()));
        assert!(principal.require_permission(&"repositories:delete:123".into()).is_err());
    }

    #[test]
    fn loads_from_json_fixture() {
        let principal: Principal = serde_json::from_str(
            r#"{"grants": ["repositories:read,modify:*", "groups"]}"#,
        )
        .unwrap();

        assert_eq!(principal.grants.len(), 2);
        assert!(principal.is_permitted(&"groups:delete:7".into()));
        assert!(principal.is_permitted(&"repositories:modify:abc".into()));
        assert!(!principal.is_permitted(&"repositories:delete:abc".into()));
    }

    #[test]
    fn serializes_only_its_grants() {
        let principal = Principal::new().with_grant("repositories:create").unwrap();
        assert_eq!(
            serde_json::to_value(&principal).unwrap(),
            serde_json::json!({"grants": ["repositories:create"]})
        );
        assert_eq!(
            serde_json::from_str::<Principal>("{}").unwrap(),
            Principal::new()
        );
    }
}
