//! Plain-text views of the open form and the submitted record list.

use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::progress::render_bar;
use crate::forms::{Control, FormRenderer, Widget};
use crate::registry::FormRegistry;
use crate::session::Record;

/// One line per field plus its inline error, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub text: String,
    pub invalid: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub progress: Option<String>,
    pub rows: Vec<FieldRow>,
    pub submit: String,
}

impl FormView {
    pub fn build(form: &FormRenderer, bar_width: Option<usize>) -> Self {
        let controls = form.controls();
        let label_width = controls
            .iter()
            .map(|control| control.field.display_label().chars().count() + 2)
            .max()
            .unwrap_or(0);
        let rows = controls
            .iter()
            .enumerate()
            .map(|(idx, control)| FieldRow {
                text: field_row_text(idx, control, label_width),
                invalid: control.error.is_some(),
                message: control
                    .error
                    .and_then(|error| error.message().map(str::to_string)),
            })
            .collect();
        let progress = match bar_width {
            Some(width) => render_bar(form.progress(), width),
            None => format!("{}%", form.progress()),
        };
        Self {
            title: form.schema().title.clone(),
            progress: Some(progress),
            rows,
            submit: format!("[ {} ]", form.submit_label()),
        }
    }

    pub fn print(&self) {
        let formatter = Formatter::new();
        formatter.print_header(&self.title);
        if let Some(progress) = &self.progress {
            formatter.print_detail(progress);
        }
        for row in &self.rows {
            formatter.print_detail(&row.text);
            if let Some(message) = &row.message {
                println!("{}", formatter.error_text(message));
            }
        }
        formatter.print_detail(formatter.rule());
        formatter.print_detail(&self.submit);
    }
}

fn field_row_text(idx: usize, control: &Control<'_>, label_width: usize) -> String {
    let marker = if control.error.is_some() { '!' } else { ' ' };
    let label = control.field.prompt_label();
    let value = match &control.widget {
        Widget::Choice {
            placeholder,
            options,
        } => {
            let current = if control.value.is_empty() {
                placeholder.clone()
            } else {
                control.display_value()
            };
            format!("{} ({})", current, options.join(" | "))
        }
        Widget::Input(_) => control.display_value(),
    };
    format!(
        "{marker}{:>2}. {:<label_width$} {:<9}{}",
        idx + 1,
        label,
        control.field.kind.as_str(),
        value
    )
    .trim_end()
    .to_string()
}

/// `N. name: value ... formType: key` for every record, numbered from 1.
pub fn record_lines(records: &[Record], registry: &FormRegistry) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let mut parts: Vec<String> = match registry.lookup(&record.form_type) {
                Some(schema) => schema
                    .field_names()
                    .map(|name| {
                        let value = record.get(name).map(ToString::to_string).unwrap_or_default();
                        format!("{name}: {value}")
                    })
                    .collect(),
                None => record
                    .values
                    .iter()
                    .map(|(name, value)| format!("{name}: {value}"))
                    .collect(),
            };
            parts.push(format!("formType: {}", record.form_type));
            format!("{}. {}", idx + 1, parts.join("  "))
        })
        .collect()
}
