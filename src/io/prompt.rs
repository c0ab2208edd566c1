//! Interactive `[y/N]` confirmation for the overwrite guard.
use std::io::{BufRead, Write};
use std::path::Path;

use crate::core::overwrite::ConfirmOverwrite;

/// Asks on `output` and reads the answer from `input`. Only `y`/`yes`
/// (any case) confirms; anything else, including EOF or a read error,
/// declines.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for TerminalPrompt<R, W> {
    fn confirm(&mut self, path: &Path) -> bool {
        if write!(
            self.output,
            "File {} already exists. Overwrite? [y/N] ",
            path.display()
        )
        .and_then(|_| self.output.flush())
        .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(reply: &str) -> (bool, String) {
        let mut shown = Vec::new();
        let confirmed = {
            let mut prompt = TerminalPrompt::new(Cursor::new(reply.as_bytes()), &mut shown);
            prompt.confirm(Path::new("/books/book.mp3"))
        };
        (confirmed, String::from_utf8(shown).unwrap())
    }

    #[test]
    fn only_yes_confirms() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("").0);
    }

    #[test]
    fn prompt_names_the_file() {
        let (_, shown) = answer("n\n");
        assert_eq!(shown, "File /books/book.mp3 already exists. Overwrite? [y/N] ");
    }
}
