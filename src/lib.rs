pub mod cloze;
pub mod cloze_utils;
pub mod commands;
pub mod export;
pub mod logging;
pub mod session;
pub mod strategy;
pub mod tui;
pub mod utils;

pub use cloze::{ClozeResult, Token, generate_cloze, make_rng, render_text};
pub use cloze_utils::{PLACEHOLDER, count_words, split_words};
pub use session::Session;
pub use strategy::Strategy;
