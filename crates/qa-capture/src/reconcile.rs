use log::debug;
use thiserror::Error;

use crate::spec::{Questionnaire, QuestionnaireItem, QuestionnaireResponse, ResponseItem};

/// Structural disagreement between a questionnaire and a response.
///
/// Any of these makes the response tree unusable; reconciliation stops at the
/// first one found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("No matching questionnaire response item for questionnaire item {link_id}")]
    MissingResponseItem { link_id: String },
    #[error(
        "Mismatching linkIds for questionnaire item {questionnaire_link_id} and questionnaire response item {response_link_id}"
    )]
    MismatchedLinkIds {
        questionnaire_link_id: String,
        response_link_id: String,
    },
    #[error("No matching questionnaire item for questionnaire response item {link_id}")]
    MissingQuestionnaireItem { link_id: String },
}

/// Produces the authoritative response for `questionnaire`.
///
/// Without a response, an empty one mirroring the questionnaire is created.
/// An existing response is checked against the questionnaire and returned
/// untouched when every item lines up.
pub fn reconcile(
    questionnaire: &Questionnaire,
    response: Option<QuestionnaireResponse>,
) -> Result<QuestionnaireResponse, StructuralError> {
    match response {
        None => {
            debug!(
                "no response supplied, synthesizing one for {} top-level items",
                questionnaire.items.len()
            );
            Ok(synthesize(questionnaire))
        }
        Some(response) => {
            reconcile_items(&questionnaire.items, &response.items)?;
            debug!(
                "response {:?} matches questionnaire {:?}",
                response.id, questionnaire.id
            );
            Ok(response)
        }
    }
}

/// Empty response with the same shape as `questionnaire`.
pub fn synthesize(questionnaire: &Questionnaire) -> QuestionnaireResponse {
    QuestionnaireResponse {
        id: None,
        questionnaire: questionnaire.reference(),
        items: synthesize_items(&questionnaire.items),
    }
}

pub fn synthesize_items(definitions: &[QuestionnaireItem]) -> Vec<ResponseItem> {
    definitions
        .iter()
        .map(|definition| ResponseItem {
            link_id: definition.link_id.clone(),
            text: definition.text.clone(),
            answers: Vec::new(),
            items: synthesize_items(&definition.items),
        })
        .collect()
}

/// Checks that `responses` pairs up with `definitions` position by position,
/// descending into group children and into the first answer of non-group
/// items that declare follow-up items.
pub fn reconcile_items(
    definitions: &[QuestionnaireItem],
    responses: &[ResponseItem],
) -> Result<(), StructuralError> {
    let mut remaining = responses.iter();

    for definition in definitions {
        let Some(response) = remaining.next() else {
            return Err(StructuralError::MissingResponseItem {
                link_id: definition.link_id.clone(),
            });
        };

        if response.link_id != definition.link_id {
            return Err(StructuralError::MismatchedLinkIds {
                questionnaire_link_id: definition.link_id.clone(),
                response_link_id: response.link_id.clone(),
            });
        }

        // Unanswered questions may not have their follow-up items yet.
        if let Some(children) = response.child_items(definition) {
            reconcile_items(&definition.items, children)?;
        }
    }

    match remaining.next() {
        Some(orphan) => Err(StructuralError::MissingQuestionnaireItem {
            link_id: orphan.link_id.clone(),
        }),
        None => Ok(()),
    }
}
