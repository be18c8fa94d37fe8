//! Terminal boundary for the interactive wallet.

use std::io::{self, BufRead, Write};

/// Line-oriented user interaction.
pub trait Console {
    /// Shows `prompt` and reads one line, trimmed. `None` means end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Shows one line of output.
    fn println(&mut self, line: &str);
}

/// Console on the process's stdin and stdout.
pub struct Terminal {
    stdin: io::Stdin,
}

impl Terminal {
    /// Creates a console on the process's standard streams.
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn println(&mut self, line: &str) {
        println!("{}", line);
    }
}
