use crate::catalog::Selector;
use crate::types::{PlacementId, SpellId};
use std::path::PathBuf;
use thiserror::Error;

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    List,
    Search(String),
    Class(Selector<String>),
    Level(Selector<u8>),
    Reset,
    Classes,
    Levels,
    Show(SpellId),
    Add { spell_id: SpellId, upcast: u8 },
    Cast(PlacementId),
    Clear,
    Ring,
    Import(PathBuf),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("Missing {0}")]
    MissingArgument(&'static str),
    #[error("Invalid {what}: '{value}'")]
    InvalidArgument { what: &'static str, value: String },
}

pub const HELP: &str = "\
Commands:
  list                     show the filtered spell library
  search <text>            filter by name or description (empty clears)
  class <name|all>         filter by class
  level <n|all>            filter by level (0 = cantrip)
  reset                    clear all filters
  classes | levels         list available classes / levels
  show <spell-id>          full details of a spell
  add <spell-id> [upcast]  store a spell in the ring
  cast <placement-id>      cast a stored spell, removing it (alias: remove)
  clear                    empty the ring
  ring                     show the ring
  import <path>            replace the library from a CSV file
  quit                     exit";

fn parse_number<T: std::str::FromStr>(what: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidArgument {
        what,
        value: value.to_string(),
    })
}

fn required<'a>(what: &'static str, value: Option<&'a str>) -> Result<&'a str, CommandError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(CommandError::MissingArgument(what))
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let command = match verb.to_lowercase().as_str() {
        "help" | "?" => ConsoleCommand::Help,
        "list" | "ls" => ConsoleCommand::List,
        "search" => ConsoleCommand::Search(rest.to_string()),
        "class" => {
            let class = required("class name", Some(rest))?;
            ConsoleCommand::Class(class.parse().unwrap_or_default())
        }
        "level" => {
            let level = required("level", Some(rest))?;
            ConsoleCommand::Level(level.parse().map_err(|_| CommandError::InvalidArgument {
                what: "level",
                value: level.to_string(),
            })?)
        }
        "reset" => ConsoleCommand::Reset,
        "classes" => ConsoleCommand::Classes,
        "levels" => ConsoleCommand::Levels,
        "show" => {
            let id = required("spell id", args.next())?;
            ConsoleCommand::Show(SpellId(parse_number("spell id", id)?))
        }
        "add" => {
            let id = required("spell id", args.next())?;
            let upcast = match args.next() {
                Some(value) => parse_number("upcast level", value)?,
                None => 0,
            };
            ConsoleCommand::Add {
                spell_id: SpellId(parse_number("spell id", id)?),
                upcast,
            }
        }
        "cast" | "remove" | "rm" => {
            let id = required("placement id", args.next())?;
            ConsoleCommand::Cast(PlacementId(parse_number("placement id", id)?))
        }
        "clear" => ConsoleCommand::Clear,
        "ring" => ConsoleCommand::Ring,
        "import" => ConsoleCommand::Import(PathBuf::from(required("file path", Some(rest))?)),
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}
