use crate::path::ItemPath;
use crate::spec::{QuestionnaireItem, ResponseItem};
use crate::validate::{ValidationResult, ValidationStore};

/// Renderer-facing binding of one questionnaire item to its response item.
///
/// View items borrow the live trees and are rebuilt on every flatten. Edits go
/// back through the controller using `path`.
#[derive(Debug, Clone)]
pub struct ViewItem<'a> {
    pub definition: &'a QuestionnaireItem,
    pub response: &'a ResponseItem,
    pub path: ItemPath,
    /// Latest results recorded for this item, if it has been validated.
    pub validation: Option<&'a [ValidationResult]>,
}

impl<'a> ViewItem<'a> {
    pub fn link_id(&self) -> &'a str {
        &self.definition.link_id
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn is_valid(&self) -> bool {
        self.validation
            .is_none_or(|results| results.iter().all(|result| result.is_valid))
    }

    pub fn messages(&self) -> impl Iterator<Item = &'a str> {
        self.validation
            .unwrap_or_default()
            .iter()
            .filter_map(|result| result.message.as_deref())
    }
}

/// Pre-order list of view items for a top-level forest.
pub fn flatten<'a>(
    definitions: &'a [QuestionnaireItem],
    responses: &'a [ResponseItem],
) -> Vec<ViewItem<'a>> {
    flatten_with(definitions, responses, None)
}

/// Like [`flatten`], attaching stored validation results to each item.
pub fn flatten_with<'a>(
    definitions: &'a [QuestionnaireItem],
    responses: &'a [ResponseItem],
    validation: Option<&'a ValidationStore>,
) -> Vec<ViewItem<'a>> {
    let mut items = Vec::new();
    flatten_into(definitions, responses, &ItemPath::default(), validation, &mut items);
    items
}

/// The item at `path` followed by all of its descendants.
pub fn flatten_subtree<'a>(
    definition: &'a QuestionnaireItem,
    response: &'a ResponseItem,
    path: ItemPath,
    validation: Option<&'a ValidationStore>,
) -> Vec<ViewItem<'a>> {
    let mut items = Vec::new();
    push_item(definition, response, path, validation, &mut items);
    items
}

fn flatten_into<'a>(
    definitions: &'a [QuestionnaireItem],
    responses: &'a [ResponseItem],
    parent: &ItemPath,
    validation: Option<&'a ValidationStore>,
    out: &mut Vec<ViewItem<'a>>,
) {
    for (index, (definition, response)) in definitions.iter().zip(responses).enumerate() {
        push_item(definition, response, parent.child(index), validation, out);
    }
}

fn push_item<'a>(
    definition: &'a QuestionnaireItem,
    response: &'a ResponseItem,
    path: ItemPath,
    validation: Option<&'a ValidationStore>,
    out: &mut Vec<ViewItem<'a>>,
) {
    out.push(ViewItem {
        definition,
        response,
        path: path.clone(),
        validation: validation
            .and_then(|store| store.get(&path))
            .map(Vec::as_slice),
    });

    if let Some(children) = response.child_items(definition) {
        flatten_into(&definition.items, children, &path, validation, out);
    }
}

/// Resolves `path` to its questionnaire and response items.
pub fn resolve<'a>(
    definitions: &'a [QuestionnaireItem],
    responses: &'a [ResponseItem],
    path: &[usize],
) -> Option<(&'a QuestionnaireItem, &'a ResponseItem)> {
    let (&index, rest) = path.split_first()?;
    let definition = definitions.get(index)?;
    let response = responses.get(index)?;
    if rest.is_empty() {
        return Some((definition, response));
    }
    resolve(&definition.items, response.child_items(definition)?, rest)
}

pub(crate) fn resolve_mut<'q, 'r>(
    definitions: &'q [QuestionnaireItem],
    responses: &'r mut [ResponseItem],
    path: &[usize],
) -> Option<(&'q QuestionnaireItem, &'r mut ResponseItem)> {
    let (&index, rest) = path.split_first()?;
    let definition = definitions.get(index)?;
    let response = responses.get_mut(index)?;
    if rest.is_empty() {
        return Some((definition, response));
    }
    let children = response.child_items_mut(definition)?;
    resolve_mut(&definition.items, children.as_mut_slice(), rest)
}
