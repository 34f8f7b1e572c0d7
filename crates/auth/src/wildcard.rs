//! Colon-separated wildcard grants, as held by [`Principal`](crate::Principal).
//!
//! A grant is a list of parts separated by `:`; each part is a `,`-separated
//! set of tokens and `*` matches any token. A grant with fewer parts than the
//! requested permission implies everything below its last part.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use staticperm_core::SEPARATOR;

const WILDCARD: &str = "*";
const SUBPART_SEPARATOR: char = ',';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WildcardParseError {
    #[error("wildcard permission must not be empty")]
    Empty,

    #[error("wildcard permission '{0}' contains an empty part")]
    EmptyPart(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WildcardPermission {
    raw: String,
    parts: Vec<Vec<String>>,
}

impl WildcardPermission {
    pub fn parse(value: &str) -> Result<Self, WildcardParseError> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err(WildcardParseError::Empty);
        }

        let mut parts = Vec::new();
        for part in raw.split(SEPARATOR) {
            let tokens: Vec<String> = part
                .split(SUBPART_SEPARATOR)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if tokens.is_empty() {
                return Err(WildcardParseError::EmptyPart(raw.to_string()));
            }
            parts.push(tokens);
        }

        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if this grant covers `requested`.
    pub fn implies(&self, requested: &str) -> bool {
        let requested: Vec<Vec<&str>> = requested
            .split(SEPARATOR)
            .map(|part| part.split(SUBPART_SEPARATOR).map(str::trim).collect())
            .collect();

        for (index, wanted) in requested.iter().enumerate() {
            let Some(granted) = self.parts.get(index) else {
                return true;
            };
            if !is_wildcard(granted) && !wanted.iter().all(|token| contains(granted, token)) {
                return false;
            }
        }

        self.parts
            .iter()
            .skip(requested.len())
            .all(|granted| is_wildcard(granted))
    }
}

fn is_wildcard(part: &[String]) -> bool {
    part.iter().any(|token| token == WILDCARD)
}

fn contains(part: &[String], token: &str) -> bool {
    part.iter().any(|granted| granted == token)
}

impl TryFrom<String> for WildcardPermission {
    type Error = WildcardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WildcardPermission> for String {
    fn from(value: WildcardPermission) -> Self {
        value.raw
    }
}

impl core::str::FromStr for WildcardPermission {
    type Err = WildcardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl core::fmt::Display for WildcardPermission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(value: &str) -> WildcardPermission {
        WildcardPermission::parse(value).unwrap()
    }

    #[test]
    fn exact_match() {
        assert!(grant("repositories:create").implies("repositories:create"));
        assert!(!grant("repositories:create").implies("repositories:delete"));
    }

    #[test]
    fn shorter_grant_implies_longer_request() {
        assert!(grant("repositories").implies("repositories:delete:1234"));
        assert!(grant("repositories:delete").implies("repositories:delete:1234"));
        assert!(!grant("repositories:delete").implies("groups:delete:1234"));
    }

    #[test]
    fn longer_grant_needs_wildcard_tail() {
        assert!(grant("repositories:create:*").implies("repositories:create"));
        assert!(!grant("repositories:create:1234").implies("repositories:create"));
    }

    #[test]
    fn wildcards_and_subparts() {
        let g = grant("repositories:read,delete:1234");
        assert!(g.implies("repositories:delete:1234"));
        assert!(g.implies("repositories:read:1234"));
        assert!(!g.implies("repositories:modify:1234"));
        assert!(!g.implies("repositories:delete:1235"));

        assert!(grant("*:delete").implies("groups:delete:42"));
        assert!(grant("*").implies("anything:at:all"));
    }

    #[test]
    fn empty_id_part_is_not_implied_by_a_specific_id() {
        assert!(!grant("repositories:delete:1234").implies("repositories:delete:"));
        assert!(grant("repositories:delete:*").implies("repositories:delete:"));
    }

    #[test]
    fn malformed_grants_are_rejected() {
        assert_eq!(WildcardPermission::parse("  "), Err(WildcardParseError::Empty));
        assert!(matches!(
            WildcardPermission::parse("repositories::1234"),
            Err(WildcardParseError::EmptyPart(_))
        ));
    }

    #[test]
    fn serde_round_trip_keeps_the_raw_string() {
        let g: WildcardPermission = serde_json::from_str("\"repositories:*\"").unwrap();
        assert_eq!(serde_json::to_string(&g).unwrap(), "\"repositories:*\"");
        assert!(serde_json::from_str::<WildcardPermission>("\"\"").is_err());
    }
}
