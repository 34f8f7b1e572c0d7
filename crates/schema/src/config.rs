//! Build configuration.

use serde::Deserialize;

/// Environment variable that turns on strict mode.
pub const STRICT_ENV: &str = "STATICPERM_STRICT";

/// Options applied when a model is built.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// Reject the first build diagnostic instead of applying last-write-wins.
    pub strict: bool,
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Reads [`STRICT_ENV`]; anything other than `1`, `true` or `yes` keeps
    /// the default.
    pub fn from_env() -> Self {
        let strict = std::env::var(STRICT_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self { strict }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn deserializes_with_defaults() {
        let options: BuildOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, BuildOptions::default());
        let options: BuildOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert_eq!(options, BuildOptions::strict());
    }
}
