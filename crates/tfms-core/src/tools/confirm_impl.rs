//! Standard confirmation adapters.
//!
//! `PromptConfirmer` asks on a line-oriented reader/writer pair (the terminal
//! in production), `AutoConfirmer` approves everything for unattended runs.

use crate::error::Result;
use crate::features::Feature;
use crate::tools::confirm::{Confirm, is_confirmation};
use std::io::{BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::Mutex;

/// Interactive confirmation.
///
/// Writes a prompt and blocks until one line is read. End of input counts as
/// an empty answer.
#[derive(Debug)]
pub struct PromptConfirmer<R, W> {
    io: Mutex<(R, W)>,
}

impl PromptConfirmer<BufReader<Stdin>, Stdout> {
    /// Prompts on standard output and reads standard input.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R, W> PromptConfirmer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    /// Creates a confirmer over the given input and output.
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }

    /// Consumes the confirmer, returning its input and output.
    pub fn into_inner(self) -> (R, W) {
        self.io.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<R, W> Confirm for PromptConfirmer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn confirm(&self, feature: &Feature) -> Result<bool> {
        let mut io = self.io.lock().unwrap_or_else(|e| e.into_inner());
        let (input, output) = &mut *io;

        write!(
            output,
            "[{}] Do you want to apply the changes? (yes/no): ",
            feature.name
        )?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;

        Ok(is_confirmation(&answer))
    }
}

/// Approves every apply without asking.
#[derive(Debug, Default)]
pub struct AutoConfirmer;

impl AutoConfirmer {
    /// Creates a new auto confirmer.
    pub fn new() -> Self {
        Self
    }
}

impl Confirm for AutoConfirmer {
    fn confirm(&self, feature: &Feature) -> Result<bool> {
        tracing::info!(feature = %feature.name, "apply auto-approved");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn feature() -> Feature {
        Feature {
            name: "network".to_string(),
            dir: "./network".into(),
            state_file: "network.tfstate".to_string(),
        }
    }

    fn ask(input: &str) -> (bool, String) {
        let confirmer = PromptConfirmer::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let answer = confirmer.confirm(&feature()).unwrap();
        let (_, output) = confirmer.into_inner();
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_yes_confirms() {
        let (answer, output) = ask("yes\n");
        assert!(answer);
        assert_eq!(
            output,
            "[network] Do you want to apply the changes? (yes/no): "
        );
    }

    #[test]
    fn test_prompt_other_answers_decline() {
        for input in ["no\n", "\n", "Yes\n", "y\n"] {
            let (answer, _) = ask(input);
            assert!(!answer, "{:?} should not confirm", input);
        }
    }

    #[test]
    fn test_prompt_eof_declines() {
        let (answer, _) = ask("");
        assert!(!answer);
    }

    #[test]
    fn test_prompt_reads_one_line_per_feature() {
        let confirmer = PromptConfirmer::new(Cursor::new(b"no\nyes\n".to_vec()), Vec::new());

        assert!(!confirmer.confirm(&feature()).unwrap());
        assert!(confirmer.confirm(&feature()).unwrap());
    }

    #[test]
    fn test_auto_confirmer_always_confirms() {
        assert!(AutoConfirmer::new().confirm(&feature()).unwrap());
    }
}
