use crate::forms::FieldValues;
use crate::registry::FormSchema;

/// Percentage of fields, required or optional, that currently hold a
/// non-empty value. Rounded half up; a schema without fields reports 0.
pub fn compute_progress(schema: &FormSchema, values: &FieldValues) -> u8 {
    let total = schema.fields.len();
    if total == 0 {
        return 0;
    }
    let filled = schema
        .fields
        .iter()
        .filter(|field| {
            values
                .get(&field.name)
                .map(|value| !value.is_empty())
                .unwrap_or(false)
        })
        .count();
    ((filled * 200 + total) / (total * 2)) as u8
}
