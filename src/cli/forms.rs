//! Step-by-step filling of an open form.
//!
//! The wizard walks the renderer's controls in order, applying each answer
//! through [`FormRenderer::set_value`] so progress is recomputed after every
//! change. Prompting is abstracted behind [`FormInteraction`]; the shell uses
//! [`DialoguerInteraction`], tests use a scripted implementation.

use dialoguer::{theme::ColorfulTheme, Input, Password, Select};

use crate::cli::io;
use crate::cli::ui::progress::render_bar;
use crate::forms::{Control, FormRenderer, InputType, Widget};

const BACK_COMMAND: &str = ":back";
const CANCEL_COMMAND: &str = ":cancel";
const CLEAR_COMMAND: &str = ":clear";
const BACK_OPTION: &str = "← Back";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// Keep the current value and move on.
    Keep,
    /// Empty the field and move on.
    Clear,
    /// Go back to the previous field.
    Back,
    /// Abort the wizard, leaving entered values in place.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Submit,
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Every required field is filled; the caller may submit.
    Ready,
    Cancelled,
}

pub struct PromptContext<'a> {
    pub control: &'a Control<'a>,
    pub index: usize,
    pub total: usize,
    pub progress: u8,
}

pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, submit_label: &str, summary: &[String]) -> ConfirmationResponse;
}

/// Drives a [`FormRenderer`] through a [`FormInteraction`].
pub struct FormWizard<'a> {
    form: &'a mut FormRenderer,
}

impl<'a> FormWizard<'a> {
    pub fn new(form: &'a mut FormRenderer) -> Self {
        Self { form }
    }

    pub fn run<I: FormInteraction>(&mut self, interaction: &mut I) -> WizardOutcome {
        let total = self.form.schema().fields.len();
        let mut index = 0;

        loop {
            if index >= total {
                let errors = self.form.refresh_errors().to_vec();
                if let Some(first) = errors.first() {
                    for error in &errors {
                        io::print_warning(error);
                    }
                    index = self.position_of(&first.field);
                    continue;
                }
                let summary = self.summary();
                match interaction.confirm(self.form.submit_label(), &summary) {
                    ConfirmationResponse::Submit => return WizardOutcome::Ready,
                    ConfirmationResponse::Back if total > 0 => {
                        index = total - 1;
                        continue;
                    }
                    ConfirmationResponse::Back | ConfirmationResponse::Cancel => {
                        return WizardOutcome::Cancelled
                    }
                }
            }

            let (name, response) = {
                let controls = self.form.controls();
                let control = &controls[index];
                let context = PromptContext {
                    control,
                    index,
                    total,
                    progress: self.form.progress(),
                };
                (
                    control.field.name.clone(),
                    interaction.prompt_field(&context),
                )
            };

            match response {
                PromptResponse::Cancel => return WizardOutcome::Cancelled,
                PromptResponse::Back => {
                    if index == 0 {
                        io::print_warning("Already at the first field.");
                    } else {
                        index -= 1;
                    }
                }
                PromptResponse::Keep => index += 1,
                PromptResponse::Clear => {
                    if let Err(err) = self.form.clear_value(&name) {
                        io::print_warning(err);
                    }
                    index += 1;
                }
                PromptResponse::Value(raw) => match self.form.set_value(&name, &raw) {
                    Ok(_) => index += 1,
                    Err(err) => io::print_warning(err),
                },
            }
        }
    }

    fn position_of(&self, name: &str) -> usize {
        self.form
            .schema()
            .fields
            .iter()
            .position(|field| field.name == name)
            .unwrap_or(0)
    }

    fn summary(&self) -> Vec<String> {
        let mut lines = vec!["Review your entries:".to_string()];
        for control in self.form.controls() {
            let value = if control.value.is_empty() {
                "[unfilled]".to_string()
            } else {
                control.display_value()
            };
            lines.push(format!("  {}: {}", control.field.display_label(), value));
        }
        lines
    }
}

/// Terminal prompts backed by dialoguer.
pub struct DialoguerInteraction<'t> {
    theme: &'t ColorfulTheme,
    bar_width: Option<usize>,
}

impl<'t> DialoguerInteraction<'t> {
    pub fn new(theme: &'t ColorfulTheme, bar_width: Option<usize>) -> Self {
        Self { theme, bar_width }
    }

    fn print_step_header(&self, context: &PromptContext<'_>) {
        let progress = match self.bar_width {
            Some(width) => render_bar(context.progress, width),
            None => format!("{}%", context.progress),
        };
        println!(
            "\nStep {} / {} · {}",
            context.index + 1,
            context.total,
            progress
        );
    }

    fn prompt_input(&self, control: &Control<'_>, input: InputType) -> PromptResponse {
        let current = control.value.to_string();
        let result = Input::<String>::with_theme(self.theme)
            .with_prompt(format!("{} ({})", control.field.prompt_label(), input.hint()))
            .with_initial_text(current.clone())
            .allow_empty(true)
            .validate_with(move |value: &String| -> Result<(), String> {
                if value.starts_with(':') || input.accepts(value) {
                    Ok(())
                } else {
                    Err(format!("Expected {}", input.hint()))
                }
            })
            .interact_text();
        match result {
            Ok(value) => interpret_text(&value, &current),
            Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_masked(&self, control: &Control<'_>) -> PromptResponse {
        let result = Password::with_theme(self.theme)
            .with_prompt(format!(
                "{} (leave empty to keep, {} to go back)",
                control.field.prompt_label(),
                BACK_COMMAND
            ))
            .allow_empty_password(true)
            .interact();
        match result {
            Ok(value) if value.is_empty() => PromptResponse::Keep,
            Ok(value) => interpret_text(&value, ""),
            Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_choice(
        &self,
        context: &PromptContext<'_>,
        placeholder: &str,
        options: &[String],
    ) -> PromptResponse {
        let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
        if context.index > 0 {
            items.push(BACK_OPTION);
        }
        let selected = context.control.value.as_text().and_then(|current| {
            options.iter().position(|option| option == current)
        });
        let mut select = Select::with_theme(self.theme)
            .with_prompt(format!("{} ({})", context.control.field.prompt_label(), placeholder))
            .items(&items);
        if let Some(position) = selected {
            select = select.default(position);
        }
        match select.interact_opt() {
            Ok(Some(position)) if position < options.len() => {
                PromptResponse::Value(options[position].clone())
            }
            Ok(Some(_)) => PromptResponse::Back,
            Ok(None) | Err(_) => PromptResponse::Cancel,
        }
    }
}

impl FormInteraction for DialoguerInteraction<'_> {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.print_step_header(context);
        if let Some(error) = context.control.error {
            io::print_warning(error);
        }
        match &context.control.widget {
            Widget::Choice {
                placeholder,
                options,
            } => self.prompt_choice(context, placeholder, options),
            Widget::Input(InputType::Masked) => self.prompt_masked(context.control),
            Widget::Input(input) => self.prompt_input(context.control, *input),
        }
    }

    fn confirm(&mut self, submit_label: &str, summary: &[String]) -> ConfirmationResponse {
        for line in summary {
            println!("{}", line);
        }
        let items = [submit_label, BACK_OPTION, "Cancel"];
        match Select::with_theme(self.theme)
            .items(&items)
            .default(0)
            .interact_opt()
        {
            Ok(Some(0)) => ConfirmationResponse::Submit,
            Ok(Some(1)) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

fn interpret_text(value: &str, current: &str) -> PromptResponse {
    match value.trim() {
        BACK_COMMAND => PromptResponse::Back,
        CANCEL_COMMAND => PromptResponse::Cancel,
        CLEAR_COMMAND => PromptResponse::Clear,
        _ if value == current => PromptResponse::Keep,
        _ if value.is_empty() => PromptResponse::Clear,
        _ => PromptResponse::Value(value.to_string()),
    }
}
