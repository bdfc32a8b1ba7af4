use std::path::PathBuf;

use anyhow::Result;

use crate::cloze_utils::count_words;
use crate::utils::read_input;

pub fn run(input: Option<PathBuf>) -> Result<usize> {
    let text = read_input(input.as_deref())?;
    let words = count_words(&text);
    println!("Word count: {words}");
    Ok(words)
}
