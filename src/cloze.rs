use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::cloze_utils::{PLACEHOLDER, char_len, join_words, split_words};
use crate::strategy::Strategy;

/// Words at or below this many characters survive keyword mode.
pub const KEYWORD_MAX_KEPT_LEN: usize = 4;

const RANDOM_BLANK_THRESHOLD: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token {
    Kept { word: String },
    Blank { answer: String },
}

impl Token {
    pub fn kept(word: &str) -> Self {
        Token::Kept {
            word: word.to_string(),
        }
    }

    pub fn blank(answer: &str) -> Self {
        Token::Blank {
            answer: answer.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Blank { .. })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Token::Kept { word } => word,
            Token::Blank { .. } => PLACEHOLDER,
        }
    }
}

/// Tokens for one generation, index-aligned with the input words.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClozeResult {
    tokens: Vec<Token>,
}

impl ClozeResult {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn blank_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_blank()).count()
    }

    pub fn blank_positions(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_blank())
            .map(|(i, _)| i)
            .collect()
    }

    /// The hidden words, in reading order.
    pub fn answers(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Blank { answer } => Some(answer.as_str()),
                Token::Kept { .. } => None,
            })
            .collect()
    }
}

pub fn render_text(result: &ClozeResult) -> String {
    join_words(result.tokens.iter().map(Token::as_str))
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

pub fn generate_cloze<R: Rng>(
    text: &str,
    strategy: Strategy,
    custom_count: usize,
    rng: &mut R,
) -> ClozeResult {
    let words = split_words(text);

    let tokens: Vec<Token> = match strategy {
        Strategy::Keyword => words
            .iter()
            .map(|w| keep_unless(w, char_len(w) > KEYWORD_MAX_KEPT_LEN))
            .collect(),
        Strategy::Random => words
            .iter()
            .map(|w| keep_unless(w, rng.random::<f64>() > RANDOM_BLANK_THRESHOLD))
            .collect(),
        Strategy::Custom => {
            let picked = pick_blank_positions(words.len(), custom_count, rng);
            words
                .iter()
                .enumerate()
                .map(|(i, w)| keep_unless(w, picked.contains(&i)))
                .collect()
        }
        Strategy::Unchanged => words.iter().map(|w| Token::kept(w)).collect(),
    };

    let result = ClozeResult::new(tokens);
    debug!(
        %strategy,
        words = words.len(),
        blanks = result.blank_count(),
        "generated cloze"
    );
    result
}

/// Picks `min(count, len)` distinct positions in `[0, len)` uniformly.
pub fn pick_blank_positions<R: Rng>(len: usize, count: usize, rng: &mut R) -> HashSet<usize> {
    let amount = count.min(len);
    if amount == 0 {
        return HashSet::new();
    }
    index::sample(rng, len, amount).into_iter().collect()
}

fn keep_unless(word: &str, blank: bool) -> Token {
    if blank {
        Token::blank(word)
    } else {
        Token::kept(word)
    }
}
