pub mod constraints;
pub mod registry;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::path::ItemPath;
use crate::spec::{QuestionnaireItem, ResponseItem};

pub use constraints::{
    LengthConstraintValidator, MAX_LENGTH_URL, MAX_VALUE_URL, MIN_LENGTH_URL, MIN_VALUE_URL,
    REGEX_URL, REQUIRED_KEY, RegexValidator, RequiredValidator, ValueConstraintValidator,
};
pub use registry::ValidatorRegistry;

/// Latest validation results per item.
pub type ValidationStore = BTreeMap<ItemPath, Vec<ValidationResult>>;

/// Outcome of one validator on one item. `message` is set iff invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// A rule checking one answered item against a limit declared on its definition.
pub trait ConstraintValidator: Send + Sync {
    /// Extension identifier this validator reacts to.
    fn extension_url(&self) -> &str;

    fn validate(&self, item: &QuestionnaireItem, response: &ResponseItem) -> ValidationResult;
}
