use std::fmt;

use crate::config::ValidationConfig;
use crate::messages::{self, MessageTemplate};
use crate::spec::{QuestionnaireItem, ResponseItem};
use crate::validate::constraints::{
    LengthConstraintValidator, MAX_LENGTH_URL, MAX_VALUE_URL, MIN_LENGTH_URL, MIN_VALUE_URL,
    REGEX_URL, REQUIRED_KEY, RegexValidator, RequiredValidator, ValueConstraintValidator,
};
use crate::validate::{ConstraintValidator, ValidationResult};

/// Ordered set of validators run against each item.
///
/// Results always come back in registration order.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn ConstraintValidator>>,
}

impl ValidatorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in validators with the default messages.
    pub fn standard() -> Self {
        Self::from_config(&ValidationConfig::default())
    }

    /// Built-in validators with message overrides and disabled entries applied.
    pub fn from_config(config: &ValidationConfig) -> Self {
        let template = |url: &str, default: &str| MessageTemplate::new(config.message_for(url, default));

        let candidates: Vec<Box<dyn ConstraintValidator>> = vec![
            Box::new(ValueConstraintValidator::max_value(template(
                MAX_VALUE_URL,
                messages::MAX_VALUE,
            ))),
            Box::new(ValueConstraintValidator::min_value(template(
                MIN_VALUE_URL,
                messages::MIN_VALUE,
            ))),
            Box::new(LengthConstraintValidator::max_length(template(
                MAX_LENGTH_URL,
                messages::MAX_LENGTH,
            ))),
            Box::new(LengthConstraintValidator::min_length(template(
                MIN_LENGTH_URL,
                messages::MIN_LENGTH,
            ))),
            Box::new(RegexValidator::new(template(REGEX_URL, messages::REGEX))),
            Box::new(RequiredValidator::new(template(
                REQUIRED_KEY,
                messages::REQUIRED,
            ))),
        ];

        Self {
            validators: candidates
                .into_iter()
                .filter(|validator| config.is_enabled(validator.extension_url()))
                .collect(),
        }
    }

    /// Appends a validator after the ones already registered.
    pub fn register(&mut self, validator: impl ConstraintValidator + 'static) {
        self.validators.push(Box::new(validator));
    }

    pub fn with(mut self, validator: impl ConstraintValidator + 'static) -> Self {
        self.register(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn extension_urls(&self) -> Vec<&str> {
        self.validators
            .iter()
            .map(|validator| validator.extension_url())
            .collect()
    }

    /// Runs every validator against the item, one result per validator.
    pub fn validate_node(
        &self,
        item: &QuestionnaireItem,
        response: &ResponseItem,
    ) -> Vec<ValidationResult> {
        self.validators
            .iter()
            .map(|validator| validator.validate(item, response))
            .collect()
    }

    /// First failing result in registration order, if any.
    pub fn first_failure(
        &self,
        item: &QuestionnaireItem,
        response: &ResponseItem,
    ) -> Option<ValidationResult> {
        self.validators
            .iter()
            .map(|validator| validator.validate(item, response))
            .find(|result| !result.is_valid)
    }

    pub fn is_valid(&self, item: &QuestionnaireItem, response: &ResponseItem) -> bool {
        self.first_failure(item, response).is_none()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.extension_urls())
            .finish()
    }
}
