use std::collections::HashMap;
use std::sync::Mutex;

use log::warn;
use regex::Regex;

use crate::messages::MessageTemplate;
use crate::spec::{Numeric, QuestionnaireItem, ResponseItem};
use crate::validate::{ConstraintValidator, ValidationResult};

pub const MAX_VALUE_URL: &str = "http://hl7.org/fhir/StructureDefinition/maxValue";
pub const MIN_VALUE_URL: &str = "http://hl7.org/fhir/StructureDefinition/minValue";
pub const MAX_LENGTH_URL: &str = "http://hl7.org/fhir/StructureDefinition/maxLength";
pub const MIN_LENGTH_URL: &str = "http://hl7.org/fhir/StructureDefinition/minLength";
pub const REGEX_URL: &str = "http://hl7.org/fhir/StructureDefinition/regex";
/// Key of the required-answer check; it reads the item's `required` flag.
pub const REQUIRED_KEY: &str = "required";

type MessageGenerator = Box<dyn Fn(&str) -> String + Send + Sync>;

fn from_template(template: MessageTemplate) -> MessageGenerator {
    Box::new(move |limit: &str| template.render(limit))
}

/// Compares a numeric answer with a numeric limit declared under `url`.
///
/// The predicate returns `true` when the constraint is violated. Only answers
/// of the same numeric kind as the limit are checked.
pub struct ValueConstraintValidator {
    url: String,
    predicate: Box<dyn Fn(Numeric, Numeric) -> bool + Send + Sync>,
    message: MessageGenerator,
}

impl ValueConstraintValidator {
    pub fn new(
        url: impl Into<String>,
        predicate: impl Fn(Numeric, Numeric) -> bool + Send + Sync + 'static,
        message: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            url: url.into(),
            predicate: Box::new(predicate),
            message: Box::new(message),
        }
    }

    pub fn max_value(template: MessageTemplate) -> Self {
        Self {
            url: MAX_VALUE_URL.into(),
            predicate: Box::new(|answered: Numeric, limit: Numeric| answered > limit),
            message: from_template(template),
        }
    }

    pub fn min_value(template: MessageTemplate) -> Self {
        Self {
            url: MIN_VALUE_URL.into(),
            predicate: Box::new(|answered: Numeric, limit: Numeric| answered < limit),
            message: from_template(template),
        }
    }
}

impl ConstraintValidator for ValueConstraintValidator {
    fn extension_url(&self) -> &str {
        &self.url
    }

    fn validate(&self, item: &QuestionnaireItem, response: &ResponseItem) -> ValidationResult {
        let Some(limit) = item.extension(&self.url) else {
            return ValidationResult::valid();
        };
        let Some(answer) = response.first_answer() else {
            return ValidationResult::valid();
        };

        match (answer.value.as_numeric(), limit.as_numeric()) {
            (Some(answered), Some(limit))
                if answered.same_kind(&limit) && (self.predicate)(answered, limit) =>
            {
                ValidationResult::invalid((self.message)(&limit.to_string()))
            }
            _ => ValidationResult::valid(),
        }
    }
}

/// Compares the character count of a string answer with an integer limit.
pub struct LengthConstraintValidator {
    url: String,
    predicate: fn(usize, usize) -> bool,
    message: MessageGenerator,
}

impl LengthConstraintValidator {
    pub fn max_length(template: MessageTemplate) -> Self {
        Self {
            url: MAX_LENGTH_URL.into(),
            predicate: |length, limit| length > limit,
            message: from_template(template),
        }
    }

    pub fn min_length(template: MessageTemplate) -> Self {
        Self {
            url: MIN_LENGTH_URL.into(),
            predicate: |length, limit| length < limit,
            message: from_template(template),
        }
    }
}

impl ConstraintValidator for LengthConstraintValidator {
    fn extension_url(&self) -> &str {
        &self.url
    }

    fn validate(&self, item: &QuestionnaireItem, response: &ResponseItem) -> ValidationResult {
        if let Some(limit) = item.extension(&self.url).and_then(|limit| limit.as_i64())
            && let Ok(limit) = usize::try_from(limit)
            && let Some(text) = response
                .first_answer()
                .and_then(|answer| answer.value.as_str())
            && (self.predicate)(text.chars().count(), limit)
        {
            return ValidationResult::invalid((self.message)(&limit.to_string()));
        }
        ValidationResult::valid()
    }
}

/// Requires a string answer to match the whole declared pattern.
///
/// Patterns are compiled on first use and cached; invalid ones are cached as
/// `None` and never checked.
pub struct RegexValidator {
    message: MessageGenerator,
    compiled: Mutex<HashMap<String, Option<Regex>>>,
}

impl RegexValidator {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            message: from_template(template),
            compiled: Mutex::new(HashMap::new()),
        }
    }

    fn compiled(&self, pattern: &str, link_id: &str) -> Option<Regex> {
        let mut cache = self
            .compiled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(entry) = cache.get(pattern) {
            return entry.clone();
        }
        let entry = match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!(
                    "ignoring invalid regex '{}' on item {}: {}",
                    pattern, link_id, err
                );
                None
            }
        };
        cache.insert(pattern.to_string(), entry.clone());
        entry
    }
}

impl ConstraintValidator for RegexValidator {
    fn extension_url(&self) -> &str {
        REGEX_URL
    }

    fn validate(&self, item: &QuestionnaireItem, response: &ResponseItem) -> ValidationResult {
        let Some(pattern) = item.extension(REGEX_URL).and_then(|value| value.as_str()) else {
            return ValidationResult::valid();
        };
        let Some(text) = response
            .first_answer()
            .and_then(|answer| answer.value.as_str())
        else {
            return ValidationResult::valid();
        };

        match self.compiled(pattern, &item.link_id) {
            Some(regex) if !regex.is_match(text) => {
                ValidationResult::invalid((self.message)(pattern))
            }
            _ => ValidationResult::valid(),
        }
    }
}

/// Fails items flagged `required` that carry no answer. Groups are skipped.
pub struct RequiredValidator {
    message: MessageGenerator,
}

impl RequiredValidator {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            message: from_template(template),
        }
    }
}

impl ConstraintValidator for RequiredValidator {
    fn extension_url(&self) -> &str {
        REQUIRED_KEY
    }

    fn validate(&self, item: &QuestionnaireItem, response: &ResponseItem) -> ValidationResult {
        if item.required && !item.kind.is_group() && response.answers.is_empty() {
            ValidationResult::invalid((self.message)(""))
        } else {
            ValidationResult::valid()
        }
    }
}
