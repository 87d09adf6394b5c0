use std::fmt;
use std::sync::Arc;

use crate::errors::{FormError, Result};
use crate::forms::controls::{Control, Widget};
use crate::forms::progress::compute_progress;
use crate::forms::{FieldValue, FieldValues};
use crate::registry::{FieldDescriptor, FieldKind, FormSchema};

pub const SUBMIT_LABEL: &str = "Submit";
pub const SAVE_LABEL: &str = "Save Changes";

/// Required field left empty at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    message: Option<String>,
}

impl ValidationError {
    fn required(field: &FieldDescriptor) -> Self {
        let message = if field.label.is_empty() {
            None
        } else {
            Some(format!("{} is required", field.label))
        };
        Self {
            field: field.name.clone(),
            message,
        }
    }

    /// Inline message; `None` for fields without a label.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "`{}` is required", self.field),
        }
    }
}

/// Editable state of one schema-driven form.
///
/// The renderer owns the live values, recomputes the completion percentage
/// after every change and gates submission on required fields. It never
/// clears itself after a submit; callers drop or rebuild it.
#[derive(Debug, Clone)]
pub struct FormRenderer {
    schema: Arc<FormSchema>,
    values: FieldValues,
    defaults: FieldValues,
    errors: Vec<ValidationError>,
    progress: u8,
}

impl FormRenderer {
    pub fn new(schema: Arc<FormSchema>, defaults: FieldValues) -> Self {
        let values: FieldValues = schema
            .fields
            .iter()
            .map(|field| {
                let value = defaults.get(&field.name).cloned().unwrap_or_default();
                (field.name.clone(), value)
            })
            .collect();
        let progress = compute_progress(&schema, &values);
        Self {
            schema,
            values,
            defaults,
            errors: Vec::new(),
            progress,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn error_for(&self, name: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|error| error.field == name)
    }

    /// True when the form was opened with pre-filled values.
    pub fn has_defaults(&self) -> bool {
        !self.defaults.is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.has_defaults() {
            SAVE_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// One control per field, in schema order.
    pub fn controls(&self) -> Vec<Control<'_>> {
        self.schema
            .fields
            .iter()
            .map(|field| Control {
                field,
                widget: Widget::for_field(field),
                value: self.values.get(&field.name).unwrap_or(&EMPTY),
                error: self.error_for(&field.name),
            })
            .collect()
    }

    /// Stores raw input for a field and returns the updated percentage.
    pub fn set_value(&mut self, name: &str, raw: &str) -> Result<u8> {
        let field = self.field(name)?;
        let value = match &field.kind {
            FieldKind::Dropdown { options } if !raw.is_empty() => {
                let option = options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(raw.trim()))
                    .ok_or_else(|| FormError::InvalidOption {
                        field: field.display_label().to_string(),
                        value: raw.to_string(),
                        options: options.clone(),
                    })?;
                FieldValue::Text(option.clone())
            }
            kind => FieldValue::from_input(kind, raw),
        };
        Ok(self.store(name, value))
    }

    pub fn clear_value(&mut self, name: &str) -> Result<u8> {
        self.field(name)?;
        Ok(self.store(name, FieldValue::default()))
    }

    /// Required-field check over the current values.
    pub fn validate(&self) -> Vec<ValidationError> {
        self.schema
            .fields
            .iter()
            .filter(|field| field.required)
            .filter(|field| {
                self.values
                    .get(&field.name)
                    .map(FieldValue::is_empty)
                    .unwrap_or(true)
            })
            .map(ValidationError::required)
            .collect()
    }

    /// Re-runs the required check and keeps the result as the inline errors.
    pub fn refresh_errors(&mut self) -> &[ValidationError] {
        self.errors = self.validate();
        &self.errors
    }

    /// Validates and, when every required field is filled, hands the full
    /// value mapping to `on_submit` exactly once.
    pub fn submit<F, R>(&mut self, on_submit: F) -> Result<R>
    where
        F: FnOnce(FieldValues) -> R,
    {
        if !self.refresh_errors().is_empty() {
            tracing::debug!(
                form = %self.schema.key,
                errors = self.errors.len(),
                "Submission blocked by required fields"
            );
            return Err(FormError::Validation(self.errors.clone()));
        }
        tracing::debug!(form = %self.schema.key, "Form submitted");
        Ok(on_submit(self.values.clone()))
    }

    fn field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField {
                form: self.schema.key.clone(),
                field: name.to_string(),
            })
    }

    fn store(&mut self, name: &str, value: FieldValue) -> u8 {
        if !value.is_empty() {
            self.errors.retain(|error| error.field != name);
        }
        self.values.insert(name.to_string(), value);
        self.progress = compute_progress(&self.schema, &self.values);
        tracing::trace!(form = %self.schema.key, field = name, progress = self.progress);
        self.progress
    }
}

static EMPTY: FieldValue = FieldValue::Text(String::new());
