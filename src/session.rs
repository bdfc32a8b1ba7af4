use rand::Rng;

use crate::cloze::{ClozeResult, generate_cloze, render_text};
use crate::cloze_utils::count_words;
use crate::strategy::{DEFAULT_CUSTOM_COUNT, Strategy, clamp_custom_count};

pub const EMPTY_RESULT_MESSAGE: &str = "No test generated yet.";

/// Everything the generator screen keeps between key presses.
///
/// The result is replaced wholesale on every generation; nothing is cached.
#[derive(Clone, Debug)]
pub struct Session {
    input: String,
    strategy: Strategy,
    custom_count: usize,
    result: Option<ClozeResult>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            strategy: Strategy::default(),
            custom_count: DEFAULT_CUSTOM_COUNT,
            result: None,
        }
    }

    pub fn with_input(input: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.input = input.into();
        session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.input)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn cycle_strategy(&mut self) {
        self.strategy = self.strategy.next();
    }

    pub fn custom_count(&self) -> usize {
        self.custom_count
    }

    pub fn set_custom_count(&mut self, count: usize) {
        self.custom_count = count;
    }

    pub fn increment_custom_count(&mut self) {
        let max = self.word_count().max(1);
        self.custom_count = (self.custom_count + 1).clamp(1, max);
    }

    pub fn decrement_custom_count(&mut self) {
        let max = self.word_count().max(1);
        self.custom_count = self.custom_count.saturating_sub(1).clamp(1, max);
    }

    /// Count handed to the transform, clamped against the current text.
    pub fn effective_custom_count(&self) -> usize {
        clamp_custom_count(self.custom_count, self.word_count())
    }

    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> &ClozeResult {
        let count = self.effective_custom_count();
        let result = generate_cloze(&self.input, self.strategy, count, rng);
        self.result.insert(result)
    }

    pub fn result(&self) -> Option<&ClozeResult> {
        self.result.as_ref()
    }

    pub fn display_text(&self) -> Option<String> {
        self.result.as_ref().map(render_text)
    }

    pub fn export_snapshot(&self) -> String {
        self.display_text().unwrap_or_default()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.strategy(), Strategy::Keyword);
        assert_eq!(session.custom_count(), DEFAULT_CUSTOM_COUNT);
        assert_eq!(session.word_count(), 0);
        assert!(session.display_text().is_none());
        assert_eq!(session.export_snapshot(), "");
    }

    #[test]
    fn generate_overwrites_previous_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::with_input("short words only");
        session.generate(&mut rng);
        assert_eq!(session.display_text().as_deref(), Some("_____ _____ only"));

        session.set_input("elephants are large");
        session.generate(&mut rng);
        assert_eq!(
            session.display_text().as_deref(),
            Some("_____ are _____")
        );
    }

    #[test]
    fn display_and_export_agree() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = Session::with_input("the quick brown fox jumps over the lazy dog");
        for strategy in Strategy::SELECTABLE {
            session.set_strategy(strategy);
            session.generate(&mut rng);
            assert_eq!(session.display_text(), Some(session.export_snapshot()));
        }
    }

    #[test]
    fn custom_count_is_clamped_to_text() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::with_input("one two");
        session.set_strategy(Strategy::Custom);
        session.set_custom_count(10);
        assert_eq!(session.effective_custom_count(), 2);
        assert_eq!(session.generate(&mut rng).blank_count(), 2);
    }

    #[test]
    fn increment_and_decrement_stay_in_range() {
        let mut session = Session::with_input("a b c");
        session.set_custom_count(3);
        session.increment_custom_count();
        assert_eq!(session.custom_count(), 3);

        for _ in 0..5 {
            session.decrement_custom_count();
        }
        assert_eq!(session.custom_count(), 1);

        session.set_input("");
        session.increment_custom_count();
        assert_eq!(session.custom_count(), 1);
    }

    #[test]
    fn cycle_strategy_walks_modes() {
        let mut session = Session::new();
        session.cycle_strategy();
        assert_eq!(session.strategy(), Strategy::Random);
        session.cycle_strategy();
        assert_eq!(session.strategy(), Strategy::Custom);
        session.cycle_strategy();
        assert_eq!(session.strategy(), Strategy::Keyword);
    }

    #[test]
    fn empty_input_generates_empty_result() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new();
        session.set_strategy(Strategy::Custom);
        assert!(session.generate(&mut rng).is_empty());
        assert_eq!(session.display_text().as_deref(), Some(""));
        assert_eq!(session.export_snapshot(), "");
    }
}
