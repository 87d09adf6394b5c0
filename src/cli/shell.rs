use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    hint::Hinter,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, KeyEvent, Validator,
};
use shell_words::{quote, split, ParseError};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::config::Config;

const SCRIPT_ENV: &str = "DYNAFORM_CLI_SCRIPT";

/// Runs the shell, reading commands from stdin when `DYNAFORM_CLI_SCRIPT` is set.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "Shell starting");

    let result = match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    };
    tracing::debug!(status = %context.status(), "Shell stopped");
    result
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::default()));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output_info("Type `help` to list commands, `forms` to see the available form types.");

    while context.running {
        if let Some(helper) = editor.helper_mut() {
            helper.refresh(context);
        }
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if execute(context, trimmed)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running || execute(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line; command failures are reported and the loop carries on.
fn execute(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match context.process_line(line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input)
}

/// Field of the open form as offered to completion.
#[derive(Debug, Clone, Default)]
struct FieldCompletion {
    name: String,
    options: Vec<String>,
}

/// Completion and usage hints drawn from the shell state before each prompt.
#[derive(Default, Helper, Highlighter, Validator)]
struct CommandHelper {
    commands: Vec<(String, String)>,
    form_keys: Vec<String>,
    fields: Vec<FieldCompletion>,
    record_count: usize,
}

impl CommandHelper {
    fn refresh(&mut self, context: &ShellContext) {
        self.commands = context
            .registry
            .list()
            .into_iter()
            .map(|entry| {
                let args = entry.usage.strip_prefix(entry.name).unwrap_or("").trim();
                (entry.name.to_string(), args.to_string())
            })
            .collect();
        self.form_keys = context
            .session
            .registry()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.fields = context
            .active_form
            .as_ref()
            .map(|form| {
                form.schema()
                    .fields
                    .iter()
                    .map(|field| FieldCompletion {
                        name: field.name.clone(),
                        options: field
                            .kind
                            .options()
                            .map(|options| {
                                options.iter().map(|option| quote(option).into_owned()).collect()
                            })
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.record_count = context.session.records().len();
    }

    /// Words that may follow the already typed `words`.
    fn candidates(&self, words: &[&str]) -> Vec<String> {
        let command = words.first().map(|word| word.to_ascii_lowercase());
        match (command.as_deref(), words.len()) {
            (None, _) => self.commands.iter().map(|(name, _)| name.clone()).collect(),
            (Some("help"), 1) => self.commands.iter().map(|(name, _)| name.clone()).collect(),
            (Some("select"), 1) => self.form_keys.clone(),
            (Some("set" | "clear"), 1) => {
                self.fields.iter().map(|field| field.name.clone()).collect()
            }
            (Some("set"), 2) => self
                .fields
                .iter()
                .find(|field| field.name == words[1])
                .map(|field| field.options.clone())
                .unwrap_or_default(),
            (Some("edit" | "delete"), 1) => {
                (1..=self.record_count).map(|number| number.to_string()).collect()
            }
            (Some("config"), 1) => Config::KEYS.iter().map(|key| key.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_ascii_lowercase();

        let pairs = self
            .candidates(&words)
            .into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    /// Shows a command's arguments once its name and a space are typed.
    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let name = line.trim_start().strip_suffix(' ')?;
        self.commands
            .iter()
            .find(|(command, args)| command.eq_ignore_ascii_case(name) && !args.is_empty())
            .map(|(_, args)| args.clone())
    }
}
