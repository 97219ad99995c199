use schemars::schema_for;
use serde_json::{Value, json};

use crate::config::ValidationConfig;
use crate::spec::{Questionnaire, QuestionnaireResponse};

/// JSON Schemas of the questionnaire, response, and validator config documents.
pub fn generate() -> Result<Value, serde_json::Error> {
    Ok(json!({
        "questionnaire": serde_json::to_value(schema_for!(Questionnaire))?,
        "questionnaireResponse": serde_json::to_value(schema_for!(QuestionnaireResponse))?,
        "validationConfig": serde_json::to_value(schema_for!(ValidationConfig))?,
    }))
}
