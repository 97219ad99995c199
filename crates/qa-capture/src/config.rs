use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Validator configuration, usually loaded from a JSON file.
///
/// ```json
/// {
///   "messages": { "http://hl7.org/fhir/StructureDefinition/maxValue": "At most {{limit}}" },
///   "disabled": ["http://hl7.org/fhir/StructureDefinition/regex"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ValidationConfig {
    /// Extension url to message template override.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, String>,
    /// Extension urls left out of the standard registry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl ValidationConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    pub fn message_for<'a>(&'a self, url: &str, default: &'a str) -> &'a str {
        self.messages.get(url).map(String::as_str).unwrap_or(default)
    }

    pub fn is_enabled(&self, url: &str) -> bool {
        !self.disabled.iter().any(|disabled| disabled == url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_default() {
        assert_eq!(ValidationConfig::from_json("  ").unwrap(), ValidationConfig::default());
    }

    #[test]
    fn overrides_and_disables() {
        let config = ValidationConfig::from_json(
            r#"{"messages": {"max": "At most {{limit}}"}, "disabled": ["regex"]}"#,
        )
        .expect("config");
        assert_eq!(config.message_for("max", "fallback"), "At most {{limit}}");
        assert_eq!(config.message_for("min", "fallback"), "fallback");
        assert!(!config.is_enabled("regex"));
        assert!(config.is_enabled("max"));
    }
}
