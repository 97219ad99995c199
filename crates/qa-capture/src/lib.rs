#![allow(missing_docs)]

pub mod config;
pub mod controller;
pub mod flatten;
pub mod messages;
pub mod path;
pub mod reconcile;
pub mod render;
pub mod schema;
pub mod spec;
pub mod validate;

pub use config::ValidationConfig;
pub use controller::{ControllerError, FormController, NodeValidation, ValidationReport};
pub use flatten::{ViewItem, flatten, flatten_with, resolve};
pub use messages::MessageTemplate;
pub use path::{ItemPath, PathParseError};
pub use reconcile::{StructuralError, reconcile, reconcile_items, synthesize, synthesize_items};
pub use render::{RenderProgress, render_json_ui, render_text};
pub use schema::generate as model_schema;
pub use spec::{
    Answer, ItemType, Numeric, Primitive, Questionnaire, QuestionnaireItem, QuestionnaireResponse,
    ResponseItem,
};
pub use validate::{ConstraintValidator, ValidationResult, ValidatorRegistry};
