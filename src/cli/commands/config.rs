use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change shell preferences",
        "config [<key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [key, value @ ..] if !value.is_empty() => {
            let key = key.to_lowercase();
            context.config.set(&key, &value.join(" "))?;
            context.persist_config()?;
            tracing::info!(key = %key, "Configuration updated");
            io::print_success("Configuration updated.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [<key> <value>] (keys: {})",
            Config::KEYS.join(", ")
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let formatter = Formatter::new();
    formatter.print_header("Configuration");
    let entries = context.config.entries();
    let rows: Vec<(&str, &str)> = entries
        .iter()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    formatter.print_two_column(&rows);
    formatter.print_detail(format!("File: {}", context.config_manager.path().display()));
    Ok(())
}
