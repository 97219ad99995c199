use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::value::Primitive;

/// Kind of a questionnaire item. Only `group` changes how children are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Group,
    Display,
    Boolean,
    Decimal,
    Integer,
    String,
    Text,
    Choice,
}

impl ItemType {
    pub fn is_group(self) -> bool {
        matches!(self, ItemType::Group)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Group => "group",
            ItemType::Display => "display",
            ItemType::Boolean => "boolean",
            ItemType::Decimal => "decimal",
            ItemType::Integer => "integer",
            ItemType::String => "string",
            ItemType::Text => "text",
            ItemType::Choice => "choice",
        }
    }
}

/// One node of the immutable form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireItem {
    pub link_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: ItemType,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Extension url to declared value, e.g. a `maxValue` limit.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Primitive>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<QuestionnaireItem>,
}

impl QuestionnaireItem {
    pub fn new(link_id: impl Into<String>, kind: ItemType) -> Self {
        Self {
            link_id: link_id.into(),
            text: None,
            kind,
            required: false,
            extensions: BTreeMap::new(),
            items: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_extension(mut self, url: impl Into<String>, value: impl Into<Primitive>) -> Self {
        self.extensions.insert(url.into(), value.into());
        self
    }

    pub fn with_item(mut self, item: QuestionnaireItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn extension(&self, url: &str) -> Option<&Primitive> {
        self.extensions.get(url)
    }
}

/// Root of a form definition. The root is not an item itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Questionnaire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<QuestionnaireItem>,
}

impl Questionnaire {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: QuestionnaireItem) -> Self {
        self.items.push(item);
        self
    }

    /// Canonical reference stored on responses created from this questionnaire.
    pub fn reference(&self) -> Option<String> {
        self.id.as_ref().map(|id| format!("Questionnaire/{id}"))
    }
}
