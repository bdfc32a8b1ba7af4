use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;

use crate::cloze_utils::strip_line_ending;

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Reads the text to blank from a file, or from stdin when the path is
/// missing or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let raw = match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Could not read text from stdin")?;
            buf
        }
    };
    Ok(strip_line_ending(&raw).to_string())
}

pub fn ask_yn(prompt: String) -> Result<bool> {
    println!("{}", prompt);
    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Proceed? ")
        .report(true)
        .wait_for_newline(true)
        .interact()?;
    Ok(answer)
}

/// Joins an error and its causes on one line, for status bars.
pub fn flatten_error(err: &anyhow::Error) -> String {
    err.chain()
        .map(|cause| cause.to_string().replace('\n', " "))
        .collect::<Vec<_>>()
        .join(": ")
}
