use serde_json::{Map, Value, json};

use crate::flatten::ViewItem;
use crate::spec::{Answer, ItemType};

/// Progress counters over answerable view items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Counts non-group, non-display items and how many of them carry an answer.
pub fn progress(items: &[ViewItem<'_>]) -> RenderProgress {
    let answerable = items.iter().filter(|item| is_answerable(item));
    let (answered, total) = answerable.fold((0, 0), |(answered, total), item| {
        let answered = answered + usize::from(!item.response.answers.is_empty());
        (answered, total + 1)
    });
    RenderProgress { answered, total }
}

fn is_answerable(item: &ViewItem<'_>) -> bool {
    !matches!(item.definition.kind, ItemType::Group | ItemType::Display)
}

/// Render the view items as a structured JSON-friendly value.
pub fn render_json_ui(items: &[ViewItem<'_>]) -> Value {
    let progress = progress(items);
    let rendered = items
        .iter()
        .map(|item| {
            let mut map = Map::new();
            map.insert("path".into(), Value::String(item.path.to_string()));
            map.insert("linkId".into(), Value::String(item.link_id().to_string()));
            map.insert(
                "text".into(),
                item.definition
                    .text
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert(
                "type".into(),
                Value::String(item.definition.kind.as_str().to_string()),
            );
            map.insert("depth".into(), json!(item.depth()));
            map.insert("required".into(), Value::Bool(item.definition.required));
            if !item.response.answers.is_empty() {
                map.insert(
                    "answers".into(),
                    Value::Array(
                        item.response
                            .answers
                            .iter()
                            .map(answer_to_value)
                            .collect(),
                    ),
                );
            }
            map.insert("valid".into(), Value::Bool(item.is_valid()));
            let messages: Vec<Value> = item
                .messages()
                .map(|message| Value::String(message.to_string()))
                .collect();
            if !messages.is_empty() {
                map.insert("messages".into(), Value::Array(messages));
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "progress": {
            "answered": progress.answered,
            "total": progress.total,
        },
        "items": rendered,
    })
}

fn answer_to_value(answer: &Answer) -> Value {
    serde_json::to_value(&answer.value).unwrap_or(Value::Null)
}

/// Render the view items as indented, human-friendly text.
pub fn render_text(title: Option<&str>, items: &[ViewItem<'_>]) -> String {
    let mut lines = Vec::new();
    if let Some(title) = title {
        lines.push(format!("Questionnaire: {}", title));
    }
    let progress = progress(items);
    lines.push(format!(
        "Answered: {}/{}",
        progress.answered, progress.total
    ));

    for item in items {
        let indent = "  ".repeat(item.depth());
        let label = item
            .definition
            .text
            .as_deref()
            .unwrap_or(item.link_id());
        let mut entry = format!(
            "{}[{}] {} ({})",
            indent,
            item.path,
            label,
            item.link_id()
        );
        if item.definition.kind.is_group() {
            entry.push_str(" [group]");
        }
        if item.definition.required {
            entry.push_str(" [required]");
        }
        if !item.response.answers.is_empty() {
            let values = item
                .response
                .answers
                .iter()
                .map(|answer| answer.value.to_string())
                .collect::<Vec<_>>();
            entry.push_str(&format!(" = {}", values.join(", ")));
        }
        lines.push(entry);
        for message in item.messages() {
            lines.push(format!("{}  ! {}", indent, message));
        }
    }

    lines.join("\n")
}
