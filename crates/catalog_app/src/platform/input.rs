//! Maps lines typed at the prompt onto controller messages.
//!
//! Plain text is the search box: every line is a keystroke-level edit and
//! goes through the debounce. Lines starting with `:` are commands.

use catalog_core::{BookField, Msg};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Core(Msg),
    ShowHtml,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command `{0}` (try :help)")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a page number")]
    BadPage(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

pub fn parse_line(line: &str) -> Result<Command, InputError> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Core(Msg::QueryChanged(line.to_string())));
    };

    let command = command.trim();
    if command.is_empty() {
        return Ok(Command::Core(Msg::NoOp));
    }
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));

    let msg = match name {
        "search" | "s" => Msg::SearchSubmitted,
        "page" | "p" => {
            let page = required(rest, "page")?;
            let page = page
                .parse::<u32>()
                .map_err(|_| InputError::BadPage(page.to_string()))?;
            Msg::PageSelected(page)
        }
        "filter" | "f" => {
            let args = required(rest, "filter")?;
            let (name, value) = args
                .split_once(char::is_whitespace)
                .map(|(name, value)| (name, value.trim()))
                .unwrap_or((args, ""));
            Msg::FilterChanged {
                name: name.to_string(),
                value: value.to_string(),
            }
        }
        "edit" => Msg::EditClicked {
            id: required(rest, "edit")?.to_string(),
        },
        "set" => {
            let args = required(rest, "set")?;
            let (field, value) = args
                .split_once(char::is_whitespace)
                .map(|(field, value)| (field, value.trim()))
                .unwrap_or((args, ""));
            let field =
                BookField::parse(field).ok_or_else(|| InputError::UnknownField(field.to_string()))?;
            Msg::EditFieldChanged {
                field,
                value: value.to_string(),
            }
        }
        "save" => Msg::EditSubmitted,
        "cancel" => Msg::EditCancelled,
        "delete" => Msg::DeleteConfirmed {
            id: required(rest, "delete")?.to_string(),
        },
        "html" => return Ok(Command::ShowHtml),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Command::Core(msg))
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}
