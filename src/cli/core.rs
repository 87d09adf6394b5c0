//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::config::ConfigManager;
use crate::errors::FormError;
use crate::forms::FormRenderer;
use crate::registry::FormRegistry;
use crate::session::{SessionController, SessionPhase};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use crate::cli::shell_context::{CliMode, ShellContext};
use crate::cli::ui::views::FormView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        output::set_preferences(config.output);
        tracing::debug!(path = %config_manager.path().display(), "Configuration loaded");

        Ok(ShellContext {
            mode,
            registry,
            session: SessionController::new(FormRegistry::builtin()),
            active_form: None,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.session.phase() {
            SessionPhase::Idle => "dynaform> ".to_string(),
            SessionPhase::TypeSelected(key) => match &self.active_form {
                Some(form) => format!("dynaform [{} {}%]> ", key, form.progress()),
                None => format!("dynaform [{}]> ", key),
            },
            SessionPhase::Editing { index, form_type } => {
                format!("dynaform [edit #{} {}]> ", index + 1, form_type)
            }
        }
    }

    /// Bar width for progress output, or `None` when bars are disabled.
    pub(crate) fn bar_width(&self) -> Option<usize> {
        self.config
            .show_progress_bar
            .then_some(self.config.progress_bar_width)
    }

    /// Reopens the form for the session's current selection.
    pub(crate) fn open_active_form(&mut self) {
        self.active_form = self.session.open_renderer();
    }

    /// Drops the open form once the session no longer has a selection.
    pub(crate) fn sync_active_form(&mut self) {
        if self.session.selection().is_none() {
            self.active_form = None;
        }
    }

    pub(crate) fn active_form_mut(&mut self) -> Result<&mut FormRenderer, CommandError> {
        match (self.session.selection(), self.active_form.as_mut()) {
            (_, Some(form)) => Ok(form),
            (Some(key), None) => Err(FormError::MissingSchema(key.to_string()).into()),
            (None, None) => Err(FormError::NoFormSelected.into()),
        }
    }

    pub(crate) fn show_active_form(&self) -> CommandResult {
        match (&self.active_form, self.session.selection()) {
            (Some(form), _) => {
                FormView::build(form, self.bar_width()).print();
                Ok(())
            }
            (None, Some(key)) => Err(FormError::MissingSchema(key.to_string()).into()),
            (None, None) => Err(FormError::NoFormSelected.into()),
        }
    }

    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        output::set_preferences(self.config.output);
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Splits one input line into words and runs the named command.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };

        self.last_command = Some(line.trim().to_string());
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        let control = self.dispatch(&raw.to_lowercase(), raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Form(FormError::NoFormSelected) => {
                self.print_error("No form type selected.");
                self.print_hint("Use `forms` to list types and `select <type>` to open one.");
                Ok(())
            }
            CommandError::Form(FormError::Validation(errors)) => {
                for error in &errors {
                    self.print_error(&error.to_string());
                }
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    config_manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_config_manager(CliMode::Script, config_manager)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldValue;
    use crate::registry::{ADDRESS_INFO, USER_INFO};
    use tempfile::TempDir;

    fn script(lines: &[&str]) -> (TempDir, ShellContext) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        let context = process_script(manager, lines).unwrap();
        (dir, context)
    }

    #[test]
    fn submit_appends_record_and_closes_form() {
        let (_dir, context) = script(&[
            "select userInfo",
            "set firstName Ada",
            "set lastName Lovelace",
            "submit",
        ]);
        assert_eq!(context.session.records().len(), 1);
        assert!(context.active_form.is_none());
        assert_eq!(context.session.selection(), None);
        let record = &context.session.records()[0];
        assert_eq!(record.form_type, USER_INFO);
        assert_eq!(record.get("age"), Some(&FieldValue::from("")));
    }

    #[test]
    fn submit_with_missing_field_keeps_form_open() {
        let (_dir, context) = script(&["select userInfo", "set lastName Lovelace", "submit"]);
        assert!(context.session.records().is_empty());
        let form = context.active_form.as_ref().unwrap();
        assert_eq!(
            form.error_for("firstName").and_then(|error| error.message()),
            Some("First Name is required")
        );
    }

    #[test]
    fn unlisted_state_blocks_submit() {
        let (_dir, context) = script(&[
            "select addressInfo",
            "set street \"MG Road\"",
            "set city Pune",
            "set state Goa",
            "submit",
        ]);
        assert!(context.session.records().is_empty());
        let form = context.active_form.as_ref().unwrap();
        assert_eq!(form.schema().key, ADDRESS_INFO);
        assert!(form.value("state").unwrap().is_empty());
        assert!(form.error_for("state").is_some());
    }

    #[test]
    fn edit_then_submit_updates_in_place() {
        let (_dir, context) = script(&[
            "select userInfo",
            "set firstName Ada",
            "set lastName Lovelace",
            "submit",
            "edit 1",
            "set firstName Augusta",
            "submit",
        ]);
        assert_eq!(context.session.records().len(), 1);
        assert_eq!(
            context.session.records()[0].get("firstName"),
            Some(&FieldValue::from("Augusta"))
        );
        assert!(!context.session.is_editing());
    }

    #[test]
    fn select_is_refused_while_editing() {
        let (_dir, context) = script(&[
            "select userInfo",
            "set firstName Ada",
            "set lastName Lovelace",
            "submit",
            "edit 1",
            "select addressInfo",
        ]);
        assert!(context.session.is_editing());
        assert_eq!(context.session.selection(), Some(USER_INFO));
    }

    #[test]
    fn deleting_edited_record_closes_form() {
        let (_dir, context) = script(&[
            "select userInfo",
            "set firstName Ada",
            "set lastName Lovelace",
            "submit",
            "edit 1",
            "delete 1",
        ]);
        assert!(context.session.records().is_empty());
        assert!(context.active_form.is_none());
        assert!(!context.session.is_editing());
    }

    #[test]
    fn set_rejects_letters_in_number_field() {
        let (_dir, context) = script(&["select userInfo", "set age abc"]);
        let form = context.active_form.as_ref().unwrap();
        assert!(form.value("age").unwrap().is_empty());
    }

    #[test]
    fn exit_stops_processing() {
        let (_dir, context) = script(&["exit", "select userInfo"]);
        assert_eq!(context.session.selection(), None);
    }

    #[test]
    fn config_changes_are_persisted() {
        let (dir, context) = script(&["config progress_bar_width 12"]);
        assert_eq!(context.config.progress_bar_width, 12);
        let reloaded = ConfigManager::with_base_dir(dir.path())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reloaded.progress_bar_width, 12);
    }

    #[test]
    fn prompt_reflects_session_phase() {
        let (_dir, mut context) = script(&["select userInfo", "set firstName Ada"]);
        assert_eq!(context.prompt(), "dynaform [userInfo 33%]> ");
        context.process_line("cancel").unwrap();
        assert_eq!(context.prompt(), "dynaform> ");
    }
}
