//! Static catalogue of the form schemas the application knows how to render.
//!
//! A schema is pure data: an ordered list of field descriptors. Adding a new
//! form type means registering one more [`FormSchema`]; nothing else in the
//! renderer or the session controller changes.

mod builtin;

use std::sync::Arc;

pub use builtin::{ADDRESS_INFO, PAYMENT_INFO, USER_INFO};

/// Input kinds supported by the renderer. Options only exist on dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Password,
    Dropdown { options: Vec<String> },
}

impl FieldKind {
    pub fn dropdown<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Dropdown {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Dropdown { options } => Some(options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Password => "password",
            FieldKind::Dropdown { .. } => "dropdown",
        }
    }
}

/// Static metadata for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDescriptor {
    /// Creates a required field; use [`FieldDescriptor::optional`] to relax it.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Label used when presenting the field; falls back to the field name for
    /// unlabeled fields.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Display label with a trailing `*` on required fields.
    pub fn prompt_label(&self) -> String {
        if self.required {
            format!("{} *", self.display_label())
        } else {
            self.display_label().to_string()
        }
    }
}

/// Ordered list of field descriptors identified by a form-type key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub key: String,
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Mapping from form-type key to schema, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    schemas: Vec<Arc<FormSchema>>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the user, address and payment forms.
    pub fn builtin() -> Self {
        Self {
            schemas: builtin::schemas().to_vec(),
        }
    }

    /// Adds a schema, replacing any existing entry with the same key.
    pub fn register(&mut self, schema: FormSchema) {
        let schema = Arc::new(schema);
        match self
            .schemas
            .iter_mut()
            .find(|existing| existing.key == schema.key)
        {
            Some(slot) => *slot = schema,
            None => self.schemas.push(schema),
        }
    }

    pub fn lookup(&self, key: &str) -> Option<Arc<FormSchema>> {
        self.schemas
            .iter()
            .find(|schema| schema.key == key)
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.schemas.iter().any(|schema| schema.key == key)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &FormSchema> + '_ {
        self.schemas.iter().map(|schema| schema.as_ref())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.schemas.iter().map(|schema| schema.key.as_str()).collect()
    }
}
