pub mod questionnaire;
pub mod response;
pub mod value;

pub use questionnaire::{ItemType, Questionnaire, QuestionnaireItem};
pub use response::{Answer, QuestionnaireResponse, ResponseItem};
pub use value::{Numeric, Primitive};
