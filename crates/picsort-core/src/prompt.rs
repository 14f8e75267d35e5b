//! Asking the operator to confirm an event name.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Turns a suggested event name into the one to use
pub trait Confirmer {
    fn confirm(&mut self, suggestion: &str) -> Result<String>;
}

/// Prompts on a writer and reads the answer from a reader.
///
/// An empty line (or end of input) accepts the suggestion.
pub struct ConsoleConfirmer<R, W> {
    input: R,
    output: W,
}

impl ConsoleConfirmer<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdout, read from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, suggestion: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}> ", suggestion)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Confirmer for ConsoleConfirmer<R, W> {
    fn confirm(&mut self, suggestion: &str) -> Result<String> {
        loop {
            let answer = self
                .ask(suggestion)
                .map_err(|e| Error::Prompt(e.to_string()))?;

            let name = match answer {
                None => {
                    // Nobody is typing; take the suggestion
                    let _ = writeln!(self.output);
                    return Ok(suggestion.to_string());
                }
                Some(answer) if answer.is_empty() => return Ok(suggestion.to_string()),
                Some(answer) => answer,
            };

            match validate_event_name(&name) {
                Ok(()) => return Ok(name),
                Err(reason) => {
                    writeln!(self.output, "!!! {}", reason)
                        .map_err(|e| Error::Prompt(e.to_string()))?;
                }
            }
        }
    }
}

/// Accepts every suggestion without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptSuggestions;

impl Confirmer for AcceptSuggestions {
    fn confirm(&mut self, suggestion: &str) -> Result<String> {
        Ok(suggestion.to_string())
    }
}

/// Event names become a single directory level in the archive
pub fn validate_event_name(name: &str) -> std::result::Result<(), String> {
    if name == "." || name == ".." {
        return Err(format!("'{}' is not a usable event name", name));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!("Event name '{}' must not contain path separators", name));
    }
    if name.contains('\0') {
        return Err("Event name must not contain NUL".to_string());
    }
    Ok(())
}
