//! Line-oriented interactive session driving an [`OrderBuilder`].

use colored::Colorize;
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::render::render_view;
use tacobox_core::{Menu, OrderAction, OrderBuilder, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(OrderAction),
    View,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{value}` is not a valid {what}")]
    InvalidNumber { value: String, what: &'static str },
}

const HELP: &str = "\
commands:
  tap <id>        select an item (opens the quantity prompt or toggles)
  + | - | adj <n> change the pending quantity
  confirm | ok    add the pending item
  cancel          close the prompt
  rm <id>         remove an item from the summary
  clear           empty the order
  goto <n>        jump to step n (1-based)
  next | prev     move between steps
  view | json     show the current state
  quit";

fn required<'a>(
    arg: Option<&'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, what })
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    let command = match head.to_lowercase().as_str() {
        "tap" | "t" => Command::Action(OrderAction::TapItem {
            item_id: required(arg, "tap", "an item id")?.to_string(),
        }),
        "+" => Command::Action(OrderAction::AdjustQuantity { delta: 1 }),
        "-" => Command::Action(OrderAction::AdjustQuantity { delta: -1 }),
        "adj" => {
            let raw = required(arg, "adj", "a signed amount")?;
            let delta = raw.parse().map_err(|_| CommandError::InvalidNumber {
                value: raw.to_string(),
                what: "quantity delta",
            })?;
            Command::Action(OrderAction::AdjustQuantity { delta })
        }
        "confirm" | "ok" => Command::Action(OrderAction::Confirm),
        "cancel" => Command::Action(OrderAction::Cancel),
        "rm" | "remove" => Command::Action(OrderAction::RemoveEntry {
            item_id: required(arg, "rm", "an item id")?.to_string(),
        }),
        "clear" => Command::Action(OrderAction::ClearAll),
        "goto" | "step" => {
            let raw = required(arg, "goto", "a step number")?;
            let ordinal: usize = raw.parse().map_err(|_| CommandError::InvalidNumber {
                value: raw.to_string(),
                what: "step number",
            })?;
            // Step 0 maps past the end so the engine reports it as out of range.
            let index = ordinal.checked_sub(1).unwrap_or(usize::MAX);
            Command::Action(OrderAction::GoToStep { index })
        }
        "next" | "n" => Command::Action(OrderAction::Next),
        "prev" | "previous" | "p" => Command::Action(OrderAction::Previous),
        "view" | "v" => Command::View,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Drive a session until `quit` or end of input. Returns the number of applied actions.
pub fn run_session(
    menu: &Menu,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<usize> {
    let mut builder = OrderBuilder::new(menu);
    let mut applied = 0;

    writeln!(out, "{} · {}", "Tacobox".bright_cyan().bold(), menu.name())?;
    render_view(out, &builder.view())?;

    let mut line = String::new();
    loop {
        write!(out, "\n> ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{}", err.to_string().red())?;
                continue;
            }
        };

        match command {
            Command::Action(action) => match builder.dispatch(action) {
                Outcome::Applied(_) => {
                    applied += 1;
                    render_view(out, &builder.view())?;
                }
                Outcome::Ignored(reason) => {
                    writeln!(out, "{}", format!("ignored: {reason:?}").yellow())?;
                }
            },
            Command::View => render_view(out, &builder.view())?,
            Command::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&builder.view())?)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    log::info!("session ended after {applied} applied actions");
    Ok(applied)
}
