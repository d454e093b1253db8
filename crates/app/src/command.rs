use std::fmt;

/// A line of user input, already parsed. Question and option numbers are
/// 1-based as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Answer { question: usize, option: usize },
    Clear { question: usize },
    Submit,
    Restart,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument { command: &'static str },
    InvalidNumber { raw: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type a command, or `help`"),
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd}"),
            CommandError::MissingArgument { command } => {
                write!(f, "{command} is missing an argument")
            }
            CommandError::InvalidNumber { raw } => write!(f, "not a valid number: {raw}"),
        }
    }
}

impl std::error::Error for CommandError {}

fn number(
    parts: &mut std::str::SplitWhitespace<'_>,
    command: &'static str,
) -> Result<usize, CommandError> {
    let raw = parts.next().ok_or(CommandError::MissingArgument { command })?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber {
            raw: raw.to_string(),
        }),
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };

        match head.to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Self::Start),
            "answer" | "a" => {
                let question = number(&mut parts, "answer")?;
                let option = number(&mut parts, "answer")?;
                Ok(Self::Answer { question, option })
            }
            "clear" | "c" => Ok(Self::Clear {
                question: number(&mut parts, "clear")?,
            }),
            "submit" => Ok(Self::Submit),
            "restart" | "retry" | "r" => Ok(Self::Restart),
            "show" => Ok(Self::Show),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  start                   begin the quiz
  answer <q> <option>     select an option, e.g. `answer 2 3`
  clear <q>               unselect the answer to a question
  submit                  submit once every question is answered
  restart                 discard the attempt (or retry after results)
  show                    redraw the current screen
  quit";
