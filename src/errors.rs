use thiserror::Error;

use crate::forms::ValidationError;

/// Error type covering registry lookups, form state changes and session
/// operations.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("No form schema registered for `{0}`")]
    MissingSchema(String),
    #[error("Form `{form}` has no field named `{field}`")]
    UnknownField { form: String, field: String },
    #[error("`{value}` is not an option of {field} (options: {})", .options.join(", "))]
    InvalidOption {
        field: String,
        value: String,
        options: Vec<String>,
    },
    #[error("{}", summarize(.0))]
    Validation(Vec<ValidationError>),
    #[error("Select a form type first")]
    NoFormSelected,
    #[error("No form is open")]
    NoActiveForm,
    #[error("An entry is being edited; finish or cancel the edit first")]
    EditInProgress,
    #[error("No entry at position {0}")]
    RecordNotFound(usize),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;

fn summarize(errors: &[ValidationError]) -> String {
    match errors.len() {
        0 => "Form is invalid".to_string(),
        1 => errors[0].to_string(),
        count => format!("{count} required fields are empty"),
    }
}
