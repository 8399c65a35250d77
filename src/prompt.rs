//! Confirmation prompts behind an injectable abstraction.
//!
//! Steps never read stdin directly; they go through a [`Confirm`]
//! implementation carried by the step context, so tests (and `--yes` runs)
//! stay fully deterministic.

use anyhow::{Context as _, Result};
use std::io::Write as _;

/// Ask the user a yes/no question.
pub trait Confirm {
    /// Present `prompt` and return the user's decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input/output channel fails.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Interactive terminal confirmation reading one line from stdin.
///
/// Anything other than an affirmative answer (including EOF) is a decline.
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt} [y/N] ").context("writing confirmation prompt")?;
        stdout.flush().context("flushing confirmation prompt")?;

        let mut input = String::new();
        let read = std::io::stdin()
            .read_line(&mut input)
            .context("reading confirmation answer")?;
        if read == 0 {
            // EOF: treat as decline rather than hanging or failing the run.
            return Ok(false);
        }
        Ok(is_affirmative(&input))
    }
}

/// Non-interactive confirmation that accepts everything (`--yes`).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Non-interactive confirmation that declines everything.
#[derive(Debug, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(false)
    }
}

/// Interpret a raw answer line as yes/no. Only `y`/`yes` (any case) accept.
fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
