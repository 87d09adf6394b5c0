use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::config::OutputSettings;
use crate::session::{Notification, NotificationLevel};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

static PREFERENCES: OnceLock<RwLock<OutputSettings>> = OnceLock::new();

pub fn set_preferences(prefs: OutputSettings) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputSettings::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputSettings {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputSettings::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO:", "ℹ"),
        MessageKind::Success => ("OK:", "✔"),
        MessageKind::Warning => ("WARNING:", "⚠"),
        MessageKind::Error => ("ERROR:", "✖"),
        MessageKind::Hint => ("HINT:", "→"),
        MessageKind::Section => ("", ""),
    }
}

/// Renders a message the way [`print`] would, without writing it.
pub fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputSettings,
) -> String {
    let text = message.to_string();
    if kind == MessageKind::Section {
        let base = format!("=== {} ===", text.trim());
        return if prefs.plain_mode || prefs.screen_reader_mode {
            base
        } else {
            base.bold().to_string()
        };
    }

    let (plain_label, icon) = label(kind);
    if prefs.plain_mode || prefs.screen_reader_mode {
        return format!("{plain_label} {text}");
    }

    let base = format!("{icon} {text}");
    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Info | MessageKind::Hint => base,
            _ => base.bold().to_string(),
        };
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        MessageKind::Info | MessageKind::Section => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    if prefs.quiet_mode && matches!(kind, MessageKind::Info | MessageKind::Hint) {
        return;
    }
    let formatted = format_message(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Presents a session notification at its level.
pub fn notify(notification: &Notification) {
    let kind = match notification.level {
        NotificationLevel::Success => MessageKind::Success,
        NotificationLevel::Info => MessageKind::Info,
    };
    // Notifications are never silenced by quiet mode.
    let formatted = format_message(kind, notification, &current_preferences());
    println!("{}", formatted);
}
