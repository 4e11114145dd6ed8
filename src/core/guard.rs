// rizer/src/core/guard.rs
use super::{Level, Mode, Result};
use std::io::{self, BufRead, Write};

/// Answers a yes/no question. Implementations must treat anything but an
/// explicit yes as "no".
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Asks on stdout and reads the answer from stdin.
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("{} [y/N] ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(is_yes(&input))
    }
}

/// Confirms everything, for `--yes` and scripted runs.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Pixel values that look like they were meant as ratios.
pub fn ambiguous_values(values: &[Level], mode: Mode) -> Vec<&Level> {
    if !mode.is_pixel() {
        return Vec::new();
    }

    values
        .iter()
        .filter(|level| match level.value() {
            Some(v) => v.fract() != 0.0 || v < 1.0,
            None => true,
        })
        .collect()
}

/// Returns whether the run may continue.
///
/// Only asks when a width or height value is fractional, below one or not a
/// number.
pub fn guard_ambiguous_input(values: &[Level], mode: Mode, confirm: &dyn Confirm) -> Result<bool> {
    let suspicious = ambiguous_values(values, mode);
    if suspicious.is_empty() {
        return Ok(true);
    }

    let listed = suspicious
        .iter()
        .map(|l| l.text())
        .collect::<Vec<_>>()
        .join(", ");
    log::warn!("Suspicious {} value(s): {}", mode, listed);

    let prompt = format!(
        "{} expects whole pixel counts but got {}. Did you mean --ratio? Continue anyway?",
        mode, listed
    );
    let proceed = confirm.confirm(&prompt)?;
    if !proceed {
        log::info!("Aborted by user");
    }
    Ok(proceed)
}
