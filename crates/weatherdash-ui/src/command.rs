//! Terminal command grammar.
//!
//! One command per line. Positions typed by the user are 1-based and are
//! converted to 0-based indices here. Anything that does not start with a
//! known keyword is searched as a city name.

use thiserror::Error;

use crate::display::Section;

pub const HELP: &str = "\
Commands:
  <city> | search <city>     show weather for a city
  here                       show weather for your location
  fav add                    save the city on screen
  fav rm <n>                 remove favorite n
  fav view <n>               show weather for favorite n
  recent <n>                 repeat recent search n
  show home|favorites|settings
  settings | auth            open or close a panel
  dark                       toggle dark mode
  set <key> <value>          save a setting (tempUnit, windUnit, ...)
  login <email> <password>
  register <email> <password>
  logout
  help | quit
A city whose name starts with a command word needs the search prefix,
for example: search Show Low";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Here,
    FavAdd,
    FavRemove(usize),
    FavView(usize),
    Recent(usize),
    Dark,
    Set { key: String, value: String },
    Show(Section),
    Settings,
    Auth,
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a position; use a number from the list starting at 1")]
    InvalidPosition(String),

    #[error("Unknown section '{0}'; use home, favorites or settings")]
    UnknownSection(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "search" => Command::Search(rest.to_string()),
        "here" if rest.is_empty() => Command::Here,
        "fav" => parse_fav(rest)?,
        "recent" => Command::Recent(position(rest, "recent <n>")?),
        "dark" if rest.is_empty() => Command::Dark,
        "set" => {
            let (key, value) = split_pair(rest);
            if key.is_empty() {
                return Err(CommandError::Usage("set <key> <value>"));
            }
            Command::Set {
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        "show" => Command::Show(
            Section::parse(rest).ok_or_else(|| CommandError::UnknownSection(rest.to_string()))?,
        ),
        "settings" if rest.is_empty() => Command::Settings,
        "auth" if rest.is_empty() => Command::Auth,
        "login" => {
            let (email, password) = split_pair(rest);
            Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            }
        }
        "register" => {
            let (email, password) = split_pair(rest);
            Command::Register {
                email: email.to_string(),
                password: password.to_string(),
            }
        }
        "logout" if rest.is_empty() => Command::Logout,
        "help" | "?" if rest.is_empty() => Command::Help,
        "quit" | "exit" if rest.is_empty() => Command::Quit,
        _ => Command::Search(line.to_string()),
    };

    Ok(Some(command))
}

fn parse_fav(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "fav add | fav rm <n> | fav view <n>";

    let (action, arg) = split_pair(rest);
    match action {
        "add" if arg.is_empty() => Ok(Command::FavAdd),
        "rm" | "remove" => Ok(Command::FavRemove(position(arg, "fav rm <n>")?)),
        "view" => Ok(Command::FavView(position(arg, "fav view <n>")?)),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn split_pair(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((first, second)) => (first, second.trim()),
        None => (text, ""),
    }
}

/// 1-based user position to 0-based index
fn position(text: &str, usage: &'static str) -> Result<usize, CommandError> {
    if text.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidPosition(text.to_string())),
    }
}
