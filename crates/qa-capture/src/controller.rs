use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::flatten::{ViewItem, flatten_subtree, flatten_with, resolve, resolve_mut};
use crate::path::ItemPath;
use crate::reconcile::{StructuralError, reconcile, reconcile_items, synthesize_items};
use crate::spec::{Answer, Questionnaire, QuestionnaireResponse};
use crate::validate::{ValidationResult, ValidationStore, ValidatorRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("no questionnaire item at path {0}")]
    UnknownItem(ItemPath),
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Validation results for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeValidation {
    pub path: ItemPath,
    pub link_id: String,
    pub results: Vec<ValidationResult>,
}

impl NodeValidation {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|result| result.is_valid)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter_map(|result| result.message.as_deref())
    }
}

/// Validation of a whole response tree, in view order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ValidationReport {
    pub valid: bool,
    pub nodes: Vec<NodeValidation>,
}

impl ValidationReport {
    pub fn failures(&self) -> impl Iterator<Item = &NodeValidation> {
        self.nodes.iter().filter(|node| !node.is_valid())
    }
}

/// Owns a questionnaire, its authoritative response, and the validators run
/// on edits.
#[derive(Debug)]
pub struct FormController {
    questionnaire: Questionnaire,
    response: QuestionnaireResponse,
    registry: ValidatorRegistry,
    validation: ValidationStore,
}

impl FormController {
    /// Reconciles `response` (or a fresh one) against `questionnaire` using the
    /// standard validators.
    pub fn new(
        questionnaire: Questionnaire,
        response: Option<QuestionnaireResponse>,
    ) -> Result<Self, StructuralError> {
        Self::with_registry(questionnaire, response, ValidatorRegistry::standard())
    }

    pub fn with_registry(
        questionnaire: Questionnaire,
        response: Option<QuestionnaireResponse>,
        registry: ValidatorRegistry,
    ) -> Result<Self, StructuralError> {
        let response = reconcile(&questionnaire, response)?;
        Ok(Self {
            questionnaire,
            response,
            registry,
            validation: ValidationStore::new(),
        })
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn response(&self) -> &QuestionnaireResponse {
        &self.response
    }

    pub fn into_response(self) -> QuestionnaireResponse {
        self.response
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Flattens the live tree. Every call reflects the current structure.
    pub fn view_items(&self) -> Vec<ViewItem<'_>> {
        flatten_with(
            &self.questionnaire.items,
            &self.response.items,
            Some(&self.validation),
        )
    }

    pub fn validation_for(&self, path: &ItemPath) -> Option<&[ValidationResult]> {
        self.validation.get(path).map(Vec::as_slice)
    }

    /// Replaces the answers of the item at `path` and re-validates it together
    /// with its descendants.
    ///
    /// For non-group items with follow-up questions, the first answer keeps the
    /// follow-ups it already had, adopts the placeholders synthesized under the
    /// item, or gets freshly synthesized ones. Follow-ups supplied with the
    /// answer must line up with the questionnaire; otherwise the item is left
    /// untouched.
    pub fn on_answer_changed(
        &mut self,
        path: &ItemPath,
        mut answers: Vec<Answer>,
    ) -> Result<Vec<NodeValidation>, ControllerError> {
        let (definition, response) = resolve_mut(
            &self.questionnaire.items,
            &mut self.response.items,
            path.indices(),
        )
        .ok_or_else(|| ControllerError::UnknownItem(path.clone()))?;

        if !definition.kind.is_group()
            && !definition.items.is_empty()
            && let Some(first) = answers.first_mut()
        {
            if !first.items.is_empty() {
                reconcile_items(&definition.items, &first.items)?;
            } else if let Some(previous) = response.answers.first_mut()
                && !previous.items.is_empty()
            {
                first.items = std::mem::take(&mut previous.items);
            } else if !response.items.is_empty()
                && reconcile_items(&definition.items, &response.items).is_ok()
            {
                // placeholders created before the item was answered
                first.items = std::mem::take(&mut response.items);
            } else {
                first.items = synthesize_items(&definition.items);
            }
            // follow-ups of an answered non-group item only live under its first answer
            response.items.clear();
        }

        debug!(
            "item {} at {} now has {} answer(s)",
            definition.link_id,
            path,
            answers.len()
        );
        response.answers = answers;

        Ok(self.revalidate(path))
    }

    /// Validates every item and replaces all stored results.
    pub fn validate_all(&mut self) -> ValidationReport {
        let nodes: Vec<NodeValidation> =
            flatten_with(&self.questionnaire.items, &self.response.items, None)
                .into_iter()
                .map(|view| NodeValidation {
                    results: self.registry.validate_node(view.definition, view.response),
                    link_id: view.definition.link_id.clone(),
                    path: view.path,
                })
                .collect();

        self.validation = nodes
            .iter()
            .map(|node| (node.path.clone(), node.results.clone()))
            .collect();

        ValidationReport {
            valid: nodes.iter().all(NodeValidation::is_valid),
            nodes,
        }
    }

    fn revalidate(&mut self, path: &ItemPath) -> Vec<NodeValidation> {
        let nodes: Vec<NodeValidation> =
            match resolve(&self.questionnaire.items, &self.response.items, path.indices()) {
                Some((definition, response)) => {
                    flatten_subtree(definition, response, path.clone(), None)
                        .into_iter()
                        .map(|view| NodeValidation {
                            results: self.registry.validate_node(view.definition, view.response),
                            link_id: view.definition.link_id.clone(),
                            path: view.path,
                        })
                        .collect()
                }
                None => Vec::new(),
            };

        self.validation.retain(|key, _| !key.starts_with(path));
        for node in &nodes {
            self.validation.insert(node.path.clone(), node.results.clone());
        }
        nodes
    }
}
