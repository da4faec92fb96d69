//! Command table for the interactive session.
//!
//! Each entry maps a command name (and aliases) to a parser that turns the
//! rest of the input line into an [`Action`]. Execution lives in
//! [`crate::app::App::dispatch`].

use crate::error::{AppError, Result};
use std::path::PathBuf;

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Search titles; an empty term is passed through and rejected by the client
    Search(String),
    /// Clear the results
    Clear,
    /// Save the results; `None` picks a default path
    Save(Option<PathBuf>),
    /// Open the link of a row (zero-based)
    Open(usize),
    /// Show the current results again
    List,
    Help,
    Close,
}

/// One row of the command table
pub struct CommandSpec {
    pub names: &'static [&'static str],
    pub usage: &'static str,
    pub about: &'static str,
    parse: fn(&str) -> Result<Action>,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        names: &["search", "s"],
        usage: "search <term>",
        about: "Search CrossRef for articles whose title matches <term>",
        parse: parse_search,
    },
    CommandSpec {
        names: &["clear", "c"],
        usage: "clear",
        about: "Clear the current results",
        parse: parse_clear,
    },
    CommandSpec {
        names: &["save", "w"],
        usage: "save [path]",
        about: "Save results to .xlsx (or .csv); default goes to the export directory",
        parse: parse_save,
    },
    CommandSpec {
        names: &["open", "o"],
        usage: "open <#>",
        about: "Open the link of result number <#> in the browser",
        parse: parse_open,
    },
    CommandSpec {
        names: &["list", "ls"],
        usage: "list",
        about: "Show the current results again",
        parse: parse_list,
    },
    CommandSpec {
        names: &["help", "?"],
        usage: "help",
        about: "Show this help",
        parse: parse_help,
    },
    CommandSpec {
        names: &["close", "quit", "exit", "q"],
        usage: "close",
        about: "Quit",
        parse: parse_close,
    },
];

fn parse_clear(_: &str) -> Result<Action> {
    Ok(Action::Clear)
}

fn parse_list(_: &str) -> Result<Action> {
    Ok(Action::List)
}

fn parse_help(_: &str) -> Result<Action> {
    Ok(Action::Help)
}

fn parse_close(_: &str) -> Result<Action> {
    Ok(Action::Close)
}

fn parse_search(args: &str) -> Result<Action> {
    Ok(Action::Search(args.to_string()))
}

fn parse_save(args: &str) -> Result<Action> {
    if args.is_empty() {
        Ok(Action::Save(None))
    } else {
        Ok(Action::Save(Some(PathBuf::from(args))))
    }
}

fn parse_open(args: &str) -> Result<Action> {
    let row: usize = args
        .parse()
        .map_err(|_| AppError::Command(format!("'{}' is not a row number. Usage: open <#>", args)))?;
    if row == 0 {
        return Err(AppError::Command("Rows are numbered from 1".to_string()));
    }
    Ok(Action::Open(row - 1))
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, args) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let name = name.to_lowercase();

    let spec = COMMANDS
        .iter()
        .find(|c| c.names.iter().any(|n| *n == name))
        .ok_or_else(|| AppError::Command(format!("Unknown command '{}'. Type 'help' for commands.", name)))?;

    (spec.parse)(args).map(Some)
}

/// Help text listing every command
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    COMMANDS
        .iter()
        .map(|c| {
            let aliases = c.names[1..].join(", ");
            format!("  {:<width$}  {} (alias: {})", c.usage, c.about, aliases, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
