//! Operator console.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use tracing::debug;

/// Line-oriented operator I/O.
pub trait Console {
    /// Show `prompt` and read one line without its line ending.
    /// `None` means end of input. Ctrl-C is an `Interrupted` error.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn print_line(&mut self, text: &str) -> io::Result<()>;
}

/// Console on the terminal, with line editing and in-session history.
pub struct StdConsole {
    editor: DefaultEditor,
}

impl StdConsole {
    pub fn new() -> io::Result<Self> {
        let editor = DefaultEditor::new().map_err(readline_io_error)?;
        Ok(Self { editor })
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let line = readline_result(self.editor.readline(prompt))?;
        if let Some(line) = line.as_deref().filter(|l| !l.is_empty()) {
            if let Err(e) = self.editor.add_history_entry(line) {
                debug!("Failed to record history entry: {}", e);
            }
        }
        Ok(line)
    }

    fn print_line(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }
}

/// The line is returned untrimmed; whitespace is significant to the prompts.
fn readline_result(result: Result<String, ReadlineError>) -> io::Result<Option<String>> {
    match result {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Eof) => Ok(None),
        Err(ReadlineError::Interrupted) => Err(io::Error::new(
            io::ErrorKind::Interrupted,
            "interrupted by operator",
        )),
        Err(e) => Err(readline_io_error(e)),
    }
}

fn readline_io_error(error: ReadlineError) -> io::Error {
    match error {
        ReadlineError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_kept_verbatim() {
        let line = readline_result(Ok(" y ".to_string())).unwrap();
        assert_eq!(line, Some(" y ".to_string()));

        let empty = readline_result(Ok(String::new())).unwrap();
        assert_eq!(empty, Some(String::new()));
    }

    #[test]
    fn test_eof_is_end_of_input() {
        assert_eq!(readline_result(Err(ReadlineError::Eof)).unwrap(), None);
    }

    #[test]
    fn test_ctrl_c_is_interrupted() {
        let err = readline_result(Err(ReadlineError::Interrupted)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }

    #[test]
    fn test_io_failure_keeps_its_kind() {
        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        let err = readline_result(Err(ReadlineError::Io(broken))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
