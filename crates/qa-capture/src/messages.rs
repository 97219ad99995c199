use std::fmt;

use handlebars::Handlebars;
use log::warn;
use serde_json::json;

pub const MAX_VALUE: &str = "Maximum value allowed is: {{limit}}";
pub const MIN_VALUE: &str = "Minimum value allowed is: {{limit}}";
pub const MAX_LENGTH: &str = "The maximum number of characters allowed is {{limit}}";
pub const MIN_LENGTH: &str = "The minimum number of characters required is {{limit}}";
pub const REGEX: &str = "The answer doesn't match regular expression: {{limit}}";
pub const REQUIRED: &str = "Missing answer for required field.";

const TEMPLATE_NAME: &str = "message";

/// Failure message rendered from a handlebars template with a `{{limit}}` slot.
///
/// The template is compiled once; a template that fails to compile renders as
/// its raw text so a failure still has a message.
pub struct MessageTemplate {
    template: String,
    engine: Option<Handlebars<'static>>,
}

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let mut engine = Handlebars::new();
        engine.set_strict_mode(false);
        engine.register_escape_fn(handlebars::no_escape);
        let engine = match engine.register_template_string(TEMPLATE_NAME, &template) {
            Ok(()) => Some(engine),
            Err(err) => {
                warn!("message template '{}' failed to compile: {}", template, err);
                None
            }
        };
        Self { template, engine }
    }

    pub fn render(&self, limit: &str) -> String {
        let Some(engine) = &self.engine else {
            return self.template.clone();
        };
        match engine.render(TEMPLATE_NAME, &json!({ "limit": limit })) {
            Ok(message) => message,
            Err(err) => {
                warn!("message template '{}' failed to render: {}", self.template, err);
                self.template.clone()
            }
        }
    }
}

impl fmt::Debug for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageTemplate")
            .field("template", &self.template)
            .field("compiled", &self.engine.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_limit_without_escaping() {
        let template = MessageTemplate::new(REGEX);
        assert_eq!(
            template.render("^[a-z]+$"),
            "The answer doesn't match regular expression: ^[a-z]+$"
        );
        assert_eq!(
            MessageTemplate::new(MAX_VALUE).render("10"),
            "Maximum value allowed is: 10"
        );
    }

    #[test]
    fn broken_template_falls_back_to_text() {
        let template = MessageTemplate::new("limit {{#if}}");
        assert!(template.engine.is_none());
        assert_eq!(template.render("3"), "limit {{#if}}");
    }

    #[test]
    fn compiled_template_renders_repeatedly() {
        let template = MessageTemplate::new(MIN_VALUE);
        assert!(template.engine.is_some());
        assert_eq!(template.render("1"), "Minimum value allowed is: 1");
        assert_eq!(template.render("2"), "Minimum value allowed is: 2");
    }
}
