//! Line-oriented terminal prompting over any reader/writer pair.

use crate::errors::AppError;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Reads one line, without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prints `label` without a newline and returns the trimmed answer.
    pub fn ask(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|answer| answer.trim().to_string()))
    }

    /// Like [`ask`](Self::ask) but a blank answer (or end of input) is `None`.
    pub fn ask_optional(&mut self, label: &str) -> Result<Option<String>, AppError> {
        Ok(self.ask(label)?.filter(|answer| !answer.is_empty()))
    }

    /// Shows a numbered menu and returns the picked value, or `default` for anything else.
    pub fn choose<T: Copy>(
        &mut self,
        title: &str,
        options: &[(&str, T)],
        default: T,
    ) -> Result<T, AppError> {
        writeln!(self.output, "\n{}", title)?;
        for (idx, (label, _)) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", idx + 1, label)?;
        }
        let answer = self
            .ask(&format!("Choose (1-{}): ", options.len()))?
            .unwrap_or_default();

        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| options.get(idx))
            .map(|(_, value)| *value);
        Ok(picked.unwrap_or(default))
    }

    /// Collects lines until a blank line or end of input; joins them with newlines.
    pub fn read_block(&mut self) -> Result<String, AppError> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n").trim().to_string())
    }

    /// Yes/no question; only `y` and `yes` count as yes.
    pub fn confirm(&mut self, label: &str) -> Result<bool, AppError> {
        let answer = self.ask(label)?.unwrap_or_default().to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}
