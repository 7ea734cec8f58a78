//! Parsing of terminal input lines into client commands.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(Choice),
    Done,
    Lock,
    Reset,
    /// Print the local mirror as JSON
    State,
    Help,
    /// Empty line: redraw the status panel
    Render,
    /// Known command with bad arguments
    Invalid(String),
    Unknown(String),
}

/// Parse one input line.
///
/// Keywords are case-insensitive; the `select` argument accepts `a`/`b` in
/// either case.
pub fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Command::Render;
    };

    match keyword.to_ascii_lowercase().as_str() {
        "a" => Command::Select(Choice::A),
        "b" => Command::Select(Choice::B),
        "select" => match parts.next().map(|arg| arg.to_ascii_uppercase()).as_deref() {
            Some("A") => Command::Select(Choice::A),
            Some("B") => Command::Select(Choice::B),
            _ => Command::Invalid("Invalid selection. Use: a or b".to_string()),
        },
        "done" => Command::Done,
        "lock" => Command::Lock,
        "reset" => Command::Reset,
        "state" => Command::State,
        "help" => Command::Help,
        _ => Command::Unknown(keyword.to_string()),
    }
}

pub fn help_text() -> &'static str {
    "\n  Commands:\n    \
     a, b           select option A or B\n    \
     select A|B     same as above\n    \
     done           mark yourself as done\n    \
     lock           lock the selection\n    \
     reset          clear selection, lock and done list\n    \
     state          print the local state as JSON\n    \
     help           show this help\n    \
     <enter>        redraw the panel\n"
}
