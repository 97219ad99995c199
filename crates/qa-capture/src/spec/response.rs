use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::questionnaire::QuestionnaireItem;
use crate::spec::value::Primitive;

/// A single answer. Follow-up questions of non-group items hang off the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
    pub value: Primitive,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ResponseItem>,
}

impl Answer {
    pub fn new(value: impl Into<Primitive>) -> Self {
        Self {
            value: value.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: ResponseItem) -> Self {
        self.items.push(item);
        self
    }
}

/// One node of the mutable response tree, paired with a questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    pub link_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ResponseItem>,
}

impl ResponseItem {
    pub fn new(link_id: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            text: None,
            answers: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answers.push(answer);
        self
    }

    pub fn with_item(mut self, item: ResponseItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn first_answer(&self) -> Option<&Answer> {
        self.answers.first()
    }

    /// Response children paired with `definition.items`.
    ///
    /// Returns `None` when the definition declares no nested items, or when a
    /// non-group item has not been answered yet.
    pub fn child_items(&self, definition: &QuestionnaireItem) -> Option<&[ResponseItem]> {
        if definition.kind.is_group() {
            Some(&self.items)
        } else if definition.items.is_empty() {
            None
        } else {
            self.answers.first().map(|answer| answer.items.as_slice())
        }
    }

    pub fn child_items_mut(
        &mut self,
        definition: &QuestionnaireItem,
    ) -> Option<&mut Vec<ResponseItem>> {
        if definition.kind.is_group() {
            Some(&mut self.items)
        } else if definition.items.is_empty() {
            None
        } else {
            self.answers.first_mut().map(|answer| &mut answer.items)
        }
    }
}

/// Root of the captured answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct QuestionnaireResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Reference to the questionnaire, `Questionnaire/<id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ResponseItem>,
}

impl QuestionnaireResponse {
    pub fn with_item(mut self, item: ResponseItem) -> Self {
        self.items.push(item);
        self
    }
}
