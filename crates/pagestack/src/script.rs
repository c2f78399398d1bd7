//! Line-oriented navigation scripts.
//!
//! ```text
//! # comments and blank lines are ignored
//! push Root
//! push Editor --handles-back
//! back
//! insert Drafts before Editor
//! remove Drafts
//! tint #ff0000
//! title Inbox
//! pop-to-root
//! show
//! ```

use pagestack_core::color::{Color, ColorParseError};

const HANDLES_BACK_FLAG: &str = "--handles-back";
const BEFORE_KEYWORD: &str = " before ";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("{command} takes no argument, got {argument:?}")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error("expected `insert <title> before <title>`")]
    MalformedInsert,

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push { title: String, handles_back: bool },
    Pop,
    PopToRoot,
    Back,
    Insert { title: String, before: String },
    Remove(String),
    Tint(Color),
    BarBackground(Color),
    BarText(Color),
    /// `None` clears the title.
    Title(Option<String>),
    Show,
}

/// Parses one script line. Blank lines and comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword {
        "push" => parse_push(rest)?,
        "pop" => no_argument("pop", rest, Command::Pop)?,
        "pop-to-root" => no_argument("pop-to-root", rest, Command::PopToRoot)?,
        "back" => no_argument("back", rest, Command::Back)?,
        "show" => no_argument("show", rest, Command::Show)?,
        "insert" => parse_insert(rest)?,
        "remove" => Command::Remove(required("remove", rest)?),
        "tint" => Command::Tint(required("tint", rest)?.parse()?),
        "bar-background" => Command::BarBackground(required("bar-background", rest)?.parse()?),
        "bar-text" => Command::BarText(required("bar-text", rest)?.parse()?),
        "title" => Command::Title((!rest.is_empty()).then(|| rest.to_string())),
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_push(rest: &str) -> Result<Command, ScriptError> {
    // The flag only counts as its own trailing word.
    let (title, handles_back) = match rest.rsplit_once(char::is_whitespace) {
        Some((title, flag)) if flag == HANDLES_BACK_FLAG => (title.trim(), true),
        _ if rest == HANDLES_BACK_FLAG => ("", true),
        _ => (rest, false),
    };

    Ok(Command::Push {
        title: required("push", title)?,
        handles_back,
    })
}

fn parse_insert(rest: &str) -> Result<Command, ScriptError> {
    let Some((title, before)) = rest.split_once(BEFORE_KEYWORD) else {
        return Err(ScriptError::MalformedInsert);
    };

    let (title, before) = (title.trim(), before.trim());
    if title.is_empty() || before.is_empty() {
        return Err(ScriptError::MalformedInsert);
    }

    Ok(Command::Insert {
        title: title.to_string(),
        before: before.to_string(),
    })
}

fn required(command: &'static str, rest: &str) -> Result<String, ScriptError> {
    if rest.is_empty() {
        return Err(ScriptError::MissingArgument(command));
    }

    Ok(rest.to_string())
}

fn no_argument(
    command: &'static str,
    rest: &str,
    parsed: Command,
) -> Result<Command, ScriptError> {
    if !rest.is_empty() {
        return Err(ScriptError::UnexpectedArgument {
            command,
            argument: rest.to_string(),
        });
    }

    Ok(parsed)
}
