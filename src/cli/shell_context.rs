use dialoguer::theme::ColorfulTheme;

use crate::config::{Config, ConfigManager};
use crate::forms::FormRenderer;
use crate::session::SessionController;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: SessionController,
    /// Renderer for the session's current selection; `None` when nothing is
    /// selected or the selected type has no schema.
    pub active_form: Option<FormRenderer>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, selection: {:?}, records: {} }}",
            self.running,
            self.last_command,
            self.session.selection(),
            self.session.records().len()
        )
    }
}
