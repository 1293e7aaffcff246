use std::fmt::Display;
use std::io::{self, BufRead, Write};

use thiserror::Error;

pub const SYNTAX_ERR_EXPECTED_INT: &str = "syntax error: expected integer";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A non-empty, trimmed line.
    Line(String),
    /// An empty line: the user is done with the current operation.
    Done,
    /// End of input.
    Closed,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("syntax error: expected integer")]
    ExpectedInteger { input: String },
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes `text` and flushes so prompts show before input is read.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        write!(self.writer, "{text}")?;
        self.writer.flush()
    }

    pub fn read_line(&mut self) -> io::Result<Input> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Input::Closed);
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Input::Done);
        }
        Ok(Input::Line(trimmed.to_string()))
    }

    /// Reads an integer; `Ok(None)` when the user is done.
    pub fn read_int(&mut self) -> Result<Option<i64>, ConsoleError> {
        match self.read_line()? {
            Input::Line(text) => text
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ConsoleError::ExpectedInteger { input: text }),
            Input::Done | Input::Closed => Ok(None),
        }
    }

    /// Shows `prompt` and reads an integer, re-prompting after syntax errors.
    pub fn ask_int(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            self.say(prompt)?;
            match self.read_int() {
                Ok(value) => return Ok(value),
                Err(ConsoleError::ExpectedInteger { .. }) => {
                    self.say(format!("{SYNTAX_ERR_EXPECTED_INT}\n"))?;
                }
                Err(ConsoleError::Io(err)) => return Err(err),
            }
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
