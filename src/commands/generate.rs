use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cloze::{ClozeResult, Token, generate_cloze, make_rng, render_text};
use crate::cloze_utils::count_words;
use crate::export::write_export;
use crate::strategy::{Strategy, normalize_custom_count};
use crate::utils::{ask_yn, pluralize, read_input};

pub struct GenerateOptions {
    pub input: Option<PathBuf>,
    pub strategy: Strategy,
    pub count: String,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateReport<'a> {
    pub strategy: Strategy,
    pub word_count: usize,
    pub blank_count: usize,
    pub text: String,
    pub answers: Vec<&'a str>,
    pub tokens: &'a [Token],
}

impl<'a> GenerateReport<'a> {
    pub fn new(strategy: Strategy, word_count: usize, result: &'a ClozeResult) -> Self {
        Self {
            strategy,
            word_count,
            blank_count: result.blank_count(),
            text: render_text(result),
            answers: result.answers(),
            tokens: result.tokens(),
        }
    }
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let text = read_input(options.input.as_deref())?;
    let word_count = count_words(&text);
    let custom_count = if options.strategy.uses_count() {
        normalize_custom_count(&options.count, word_count)
    } else {
        0
    };

    let mut rng = make_rng(options.seed);
    let result = generate_cloze(&text, options.strategy, custom_count, &mut rng);
    let report = GenerateReport::new(options.strategy, word_count, &result);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.text);
    }

    if let Some(path) = options.output {
        if confirm_overwrite(&path, options.force)? {
            write_export(&path, &report.text)?;
            eprintln!(
                "Wrote {} ({}) to {}",
                pluralize("word", report.word_count),
                pluralize("blank", report.blank_count),
                path.display()
            );
        } else {
            info!(path = %path.display(), "export skipped");
            eprintln!("Skipped export; {} left untouched.", path.display());
        }
    }

    Ok(())
}

fn confirm_overwrite(path: &Path, force: bool) -> Result<bool> {
    if force || !path.exists() {
        return Ok(true);
    }
    ask_yn(format!("{} already exists. Overwrite it?", path.display()))
}
