use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::views::{record_lines, FormView};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "List submitted entries", "list", cmd_list),
        CommandEntry::new(
            "edit",
            "Load an entry into its form for editing",
            "edit <n>",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Delete an entry", "delete <n>", cmd_delete),
        CommandEntry::new(
            "export",
            "Print all entries as JSON",
            "export",
            cmd_export,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Submitted entries");
    let records = context.session.records();
    if records.is_empty() {
        io::print_info("No entries yet. Submit a form to add one.");
        return Ok(());
    }
    let formatter = Formatter::new();
    let editing = context.session.edit_target().map(|target| target.index);
    for (idx, line) in record_lines(records, context.session.registry())
        .into_iter()
        .enumerate()
    {
        if editing == Some(idx) {
            formatter.print_detail(format!("{line}  (editing)"));
        } else {
            formatter.print_detail(line);
        }
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = record_index(context, args, "usage: edit <n>")?;
    context.session.edit(index)?;
    context.open_active_form();
    match &context.active_form {
        Some(form) => FormView::build(form, context.bar_width()).print(),
        None => io::print_warning("This entry's form type is no longer available."),
    }
    io::print_hint("`set` fields, then `submit` to save or `cancel` to abandon.");
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let index = record_index(context, args, "usage: delete <n>")?;
    if context.mode == CliMode::Interactive {
        let prompt = format!("Delete entry #{}?", index + 1);
        if !io::confirm_action(&context.theme, &prompt, false)? {
            io::print_info("Operation cancelled.");
            return Ok(());
        }
    }
    let was_editing = context.session.is_editing();
    let notification = context.session.delete(index)?;
    context.sync_active_form();
    output::notify(&notification);
    if was_editing && !context.session.is_editing() {
        io::print_warning("The entry being edited was deleted; the edit was abandoned.");
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let json = serde_json::to_string_pretty(context.session.records())?;
    println!("{}", json);
    Ok(())
}

/// Parses a 1-based entry number into a list index.
fn record_index(context: &ShellContext, args: &[&str], usage: &str) -> Result<usize, CommandError> {
    let raw = match args {
        [raw] => *raw,
        _ => return Err(CommandError::InvalidArguments(usage.into())),
    };
    let count = context.session.records().len();
    let number: usize = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not an entry number", raw))
    })?;
    if number == 0 || number > count {
        return Err(CommandError::InvalidArguments(match count {
            0 => "There are no entries yet".to_string(),
            _ => format!("No entry #{}; choose 1 to {}", number, count),
        }));
    }
    Ok(number - 1)
}
