use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::{FieldValue, FieldValues};
use crate::registry::FormSchema;

/// One submitted set of values tagged with the form that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Uuid,
    pub form_type: String,
    pub values: FieldValues,
}

impl Record {
    /// Builds a record whose field set matches `schema` exactly: missing
    /// fields are stored as empty text and unknown keys are dropped.
    pub fn from_submission(schema: &FormSchema, values: &FieldValues) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_type: schema.key.clone(),
            values: conform(schema, values),
        }
    }

    /// Full replacement of the values, keeping identity and tag.
    pub(crate) fn replace_values(&mut self, schema: &FormSchema, values: &FieldValues) {
        self.values = conform(schema, values);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

fn conform(schema: &FormSchema, values: &FieldValues) -> FieldValues {
    schema
        .fields
        .iter()
        .map(|field| {
            let value = values.get(&field.name).cloned().unwrap_or_default();
            (field.name.clone(), value)
        })
        .collect()
}
