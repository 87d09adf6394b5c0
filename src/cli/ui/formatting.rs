use std::fmt;

use colored::Colorize;
use crossterm::terminal;

use crate::cli::output::current_preferences;
use crate::config::OutputSettings;

const FALLBACK_WIDTH: usize = 80;

pub struct Formatter {
    prefs: OutputSettings,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        if self.is_plain() {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", message);
    }

    /// Highlights inline validation messages under a field.
    pub fn error_text(&self, message: impl fmt::Display) -> String {
        let text = format!("    ! {}", message);
        if self.is_plain() {
            text
        } else if self.prefs.high_contrast_mode {
            text.bold().to_string()
        } else {
            text.red().to_string()
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, &str)]) {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("  {:<width$}  {}", label, value, width = label_width);
        }
    }

    pub fn rule(&self) -> String {
        let width = terminal::size()
            .map(|(cols, _)| usize::from(cols))
            .unwrap_or(FALLBACK_WIDTH)
            .min(FALLBACK_WIDTH);
        "-".repeat(width)
    }

    fn is_plain(&self) -> bool {
        self.prefs.plain_mode || self.prefs.screen_reader_mode
    }
}
