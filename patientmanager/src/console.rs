use crate::AppError;
use flatbit::DELIMITER;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

/// Outcome of a prompt that may be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<T> {
    Value(T),
    /// Every allowed attempt was invalid.
    Exhausted,
    /// Input reached its end.
    Closed,
}

impl<T> Prompt<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Prompt::Value(value) => Some(value),
            Prompt::Exhausted | Prompt::Closed => None,
        }
    }
}

/// Line oriented operator console. Every validating read retries at most `max_attempts` times.
pub struct Console<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, max_attempts: usize) -> Self {
        Self { input, output, max_attempts: max_attempts.max(1) }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn println(&mut self, line: impl Display) -> Result<(), AppError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn print_title(&mut self, title: &str) -> Result<(), AppError> {
        self.println(format_args!("************ {} ************", title))
    }

    pub fn print_error(&mut self, message: impl Display) -> Result<(), AppError> {
        self.print_title("Error")?;
        self.println(message)
    }

    /// Prints `message` without a newline and reads one line, `None` at end of input.
    pub fn read_line(&mut self, message: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn retry<T>(&mut self, message: &str, mut parse: impl FnMut(&str) -> Result<T, String>) -> Result<Prompt<T>, AppError> {
        for _ in 0..self.max_attempts {
            let Some(line) = self.read_line(message)? else {
                return Ok(Prompt::Closed);
            };
            match parse(&line) {
                Ok(value) => return Ok(Prompt::Value(value)),
                Err(complaint) => {
                    self.println(complaint)?;
                    self.println("")?;
                }
            }
        }
        Ok(Prompt::Exhausted)
    }

    pub fn read_int(&mut self, message: &str, range: RangeInclusive<i64>) -> Result<Prompt<i64>, AppError> {
        self.retry(message, |line| match line.trim().parse::<i64>() {
            Ok(n) if range.contains(&n) => Ok(n),
            Ok(_) => Err(format!("Please enter a number between {} and {}!", range.start(), range.end())),
            Err(_) => Err("Please enter a number!".to_string()),
        })
    }

    /// Reads free text. The record delimiter is refused so that stored lines stay well formed.
    pub fn read_string(&mut self, message: &str, allow_empty: bool) -> Result<Prompt<String>, AppError> {
        self.retry(message, |line| {
            if line.is_empty() && !allow_empty {
                Err("The input must not be empty!".to_string())
            } else if line.contains(DELIMITER) {
                Err(format!("The input must not contain '{}'!", DELIMITER))
            } else {
                Ok(line.to_string())
            }
        })
    }

    /// Waits for Enter. Returns false at end of input.
    pub fn pause(&mut self, message: &str) -> Result<bool, AppError> {
        Ok(self.read_line(message)?.is_some())
    }
}
