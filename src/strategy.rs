use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

pub const DEFAULT_CUSTOM_COUNT: usize = 3;

/// Which words a cloze test blanks out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Blank every word longer than four characters.
    #[default]
    Keyword,
    /// Blank each word on a coin flip.
    Random,
    /// Blank exactly the requested number of words.
    Custom,
    /// Keep every word. Any tag we don't recognize lands here.
    Unchanged,
}

impl Strategy {
    pub const SELECTABLE: [Strategy; 3] = [Strategy::Keyword, Strategy::Random, Strategy::Custom];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "keyword" => Strategy::Keyword,
            "random" => Strategy::Random,
            "custom" => Strategy::Custom,
            "unchanged" => Strategy::Unchanged,
            other => {
                warn!(tag = other, "unrecognized strategy, keeping text unchanged");
                Strategy::Unchanged
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Strategy::Keyword => "keyword",
            Strategy::Random => "random",
            Strategy::Custom => "custom",
            Strategy::Unchanged => "unchanged",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Keyword => "Keyword Mode",
            Strategy::Random => "Random Mode",
            Strategy::Custom => "Custom Mode",
            Strategy::Unchanged => "Unchanged",
        }
    }

    pub fn uses_count(self) -> bool {
        self == Strategy::Custom
    }

    pub fn next(self) -> Self {
        match self {
            Strategy::Keyword => Strategy::Random,
            Strategy::Random => Strategy::Custom,
            Strategy::Custom | Strategy::Unchanged => Strategy::Keyword,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Strategy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Strategy::from_tag(s))
    }
}

/// Turns whatever the user typed into a blank count the transform accepts.
///
/// Unparseable input becomes 0. Anything else is clamped into
/// `[1, word_count]`, or 0 when there are no words at all.
pub fn normalize_custom_count(raw: &str, word_count: usize) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(value) => clamp_signed(value, word_count),
        Err(_) => {
            warn!(raw, "blank count is not a number, using 0");
            0
        }
    }
}

pub fn clamp_custom_count(count: usize, word_count: usize) -> usize {
    if word_count == 0 {
        0
    } else {
        count.clamp(1, word_count)
    }
}

fn clamp_signed(value: i64, word_count: usize) -> usize {
    let count = usize::try_from(value.max(0)).unwrap_or(usize::MAX);
    let clamped = clamp_custom_count(count, word_count);
    if i64::try_from(clamped).ok() != Some(value) {
        warn!(requested = value, clamped, word_count, "blank count clamped");
    }
    clamped
}
