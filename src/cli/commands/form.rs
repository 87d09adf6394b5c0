//! Commands that pick, fill and submit the open form.

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{DialoguerInteraction, FormWizard, WizardOutcome};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::progress::render_bar;
use crate::cli::ui::views::FormView;
use crate::errors::FormError;
use crate::forms::Widget;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("forms", "List the available form types", "forms", cmd_forms),
        CommandEntry::new(
            "select",
            "Open a blank form of the given type",
            "select <type>",
            cmd_select,
        ),
        CommandEntry::new("show", "Show the open form", "show", cmd_show),
        CommandEntry::new(
            "set",
            "Set a field of the open form",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandEntry::new("clear", "Empty a field of the open form", "clear <field>", cmd_clear),
        CommandEntry::new(
            "fill",
            "Fill the open form field by field",
            "fill",
            cmd_fill,
        ),
        CommandEntry::new("submit", "Validate and submit the open form", "submit", cmd_submit),
        CommandEntry::new(
            "cancel",
            "Close the open form or abandon the current edit",
            "cancel",
            cmd_cancel,
        ),
    ]
}

fn cmd_forms(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section("Form types");
    let current = context.session.selection();
    let rows: Vec<(String, String)> = context
        .session
        .registry()
        .schemas()
        .map(|schema| {
            let marker = if current == Some(schema.key.as_str()) {
                "*"
            } else {
                " "
            };
            (
                format!("{marker} {}", schema.key),
                format!("{} ({} fields)", schema.title, schema.fields.len()),
            )
        })
        .collect();
    let entries: Vec<(&str, &str)> = rows
        .iter()
        .map(|(key, title)| (key.as_str(), title.as_str()))
        .collect();
    Formatter::new().print_two_column(&entries);
    if !context.session.selector_enabled() {
        io::print_hint("An entry is being edited; `submit` or `cancel` before selecting.");
    }
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = match args {
        [key] => *key,
        _ => return Err(CommandError::InvalidArguments("usage: select <type>".into())),
    };
    context.session.select_form_type(key)?;
    context.open_active_form();
    match &context.active_form {
        Some(form) => FormView::build(form, context.bar_width()).print(),
        None => {
            io::print_warning(format!("No form schema registered for `{}`.", key));
            io::print_hint("Use `forms` to list the available types.");
        }
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_active_form()
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    }
    let name = args[0];
    let raw = args[1..].join(" ");
    let bar_width = context.bar_width();
    let form = context.active_form_mut()?;

    let schema = form.schema();
    let field = schema.field(name).ok_or_else(|| FormError::UnknownField {
        form: schema.key.clone(),
        field: name.to_string(),
    })?;
    if let Widget::Input(input) = Widget::for_field(field) {
        if !input.accepts(&raw) {
            return Err(CommandError::InvalidArguments(format!(
                "{} expects {}",
                field.display_label(),
                input.hint()
            )));
        }
    }

    let progress = form.set_value(name, &raw)?;
    print_progress(progress, bar_width);
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = match args {
        [name] => *name,
        _ => return Err(CommandError::InvalidArguments("usage: clear <field>".into())),
    };
    let bar_width = context.bar_width();
    let progress = context.active_form_mut()?.clear_value(name)?;
    print_progress(progress, bar_width);
    Ok(())
}

fn cmd_fill(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.mode != CliMode::Interactive {
        return Err(CommandError::InvalidArguments(
            "`fill` needs an interactive terminal; use `set <field> <value>` instead".into(),
        ));
    }
    context.active_form_mut()?;
    let bar_width = context.bar_width();
    let outcome = {
        let ShellContext {
            active_form, theme, ..
        } = &mut *context;
        let Some(form) = active_form.as_mut() else {
            return Err(FormError::NoActiveForm.into());
        };
        let mut interaction = DialoguerInteraction::new(theme, bar_width);
        FormWizard::new(form).run(&mut interaction)
    };
    match outcome {
        WizardOutcome::Ready => submit_active_form(context),
        WizardOutcome::Cancelled => {
            io::print_info("Form left open; `show` to review, `submit` when ready.");
            Ok(())
        }
    }
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    submit_active_form(context)
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.cancel_edit() {
        context.sync_active_form();
        io::print_info("Edit abandoned; the entry is unchanged.");
        return Ok(());
    }
    if context.session.selection().is_some() {
        context.session.clear_selection()?;
        context.sync_active_form();
        io::print_info("Form closed.");
        return Ok(());
    }
    io::print_warning("Nothing to cancel.");
    Ok(())
}

/// Runs the open form's submit step, handing the values to the session.
pub(crate) fn submit_active_form(context: &mut ShellContext) -> CommandResult {
    context.active_form_mut()?;
    let bar_width = context.bar_width();
    let ShellContext {
        active_form,
        session,
        ..
    } = &mut *context;
    let Some(form) = active_form.as_mut() else {
        return Err(FormError::NoActiveForm.into());
    };

    match form.submit(|values| session.submit(values)) {
        Ok(result) => {
            let notification = result?;
            output::notify(&notification);
            context.sync_active_form();
            Ok(())
        }
        Err(err) => {
            FormView::build(form, bar_width).print();
            Err(err.into())
        }
    }
}

fn print_progress(progress: u8, bar_width: Option<usize>) {
    let text = match bar_width {
        Some(width) => render_bar(progress, width),
        None => format!("{}%", progress),
    };
    io::print_info(format!("Progress: {}", text));
}
