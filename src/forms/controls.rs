use chrono::NaiveDate;

use crate::forms::{FieldValue, ValidationError};
use crate::registry::{FieldDescriptor, FieldKind};

/// Native input behaviour of a single-value control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Numeric,
    Date,
    Masked,
}

impl InputType {
    /// Whether the control itself would accept the raw input. Empty input is
    /// always accepted; required checks happen at submit time.
    pub fn accepts(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return true;
        }
        match self {
            InputType::Text => raw
                .chars()
                .all(|ch| ch.is_ascii_alphabetic() || ch == ' '),
            InputType::Numeric => trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false),
            InputType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok(),
            InputType::Masked => true,
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            InputType::Text => "letters and spaces",
            InputType::Numeric => "numbers only",
            InputType::Date => "YYYY-MM-DD",
            InputType::Masked => "hidden input",
        }
    }
}

/// How a field is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget<'a> {
    /// Choice control; the placeholder is shown as a disabled first option.
    Choice {
        placeholder: String,
        options: &'a [String],
    },
    Input(InputType),
}

impl<'a> Widget<'a> {
    pub fn for_field(field: &'a FieldDescriptor) -> Self {
        match &field.kind {
            FieldKind::Dropdown { options } => Widget::Choice {
                placeholder: format!("Select {}", field.label),
                options,
            },
            FieldKind::Text => Widget::Input(InputType::Text),
            FieldKind::Number => Widget::Input(InputType::Numeric),
            FieldKind::Date => Widget::Input(InputType::Date),
            FieldKind::Password => Widget::Input(InputType::Masked),
        }
    }
}

/// One rendered input control with its current value and inline error.
#[derive(Debug, Clone)]
pub struct Control<'a> {
    pub field: &'a FieldDescriptor,
    pub widget: Widget<'a>,
    pub value: &'a FieldValue,
    pub error: Option<&'a ValidationError>,
}

impl Control<'_> {
    /// Value as it should be displayed; masked inputs never echo content.
    pub fn display_value(&self) -> String {
        match self.widget {
            Widget::Input(InputType::Masked) if !self.value.is_empty() => "••••".to_string(),
            _ => self.value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_rejects_letters() {
        assert!(InputType::Numeric.accepts("411001"));
        assert!(InputType::Numeric.accepts("-1.5"));
        assert!(!InputType::Numeric.accepts("12a"));
        assert!(InputType::Numeric.accepts(""));
    }

    #[test]
    fn date_input_requires_calendar_date() {
        assert!(InputType::Date.accepts("2027-02-28"));
        assert!(!InputType::Date.accepts("2027-02-30"));
        assert!(!InputType::Date.accepts("02/2027"));
    }

    #[test]
    fn text_input_allows_letters_and_spaces() {
        assert!(InputType::Text.accepts("Ada Lovelace"));
        assert!(!InputType::Text.accepts("R2D2"));
        assert!(InputType::Masked.accepts("R2D2!"));
    }

    #[test]
    fn dropdown_renders_choice_with_placeholder() {
        let field = FieldDescriptor::new("state", "State", FieldKind::dropdown(["Kerala"]));
        match Widget::for_field(&field) {
            Widget::Choice {
                placeholder,
                options,
            } => {
                assert_eq!(placeholder, "Select State");
                assert_eq!(options, ["Kerala".to_string()]);
            }
            other => panic!("Unexpected widget: {:?}", other),
        }
    }

    #[test]
    fn password_is_masked() {
        let field = FieldDescriptor::new("cvv", "CVV", FieldKind::Password);
        let value = FieldValue::from("123");
        let control = Control {
            field: &field,
            widget: Widget::for_field(&field),
            value: &value,
            error: None,
        };
        assert_eq!(control.widget, Widget::Input(InputType::Masked));
        assert_eq!(control.display_value(), "••••");
    }
}
