pub const PLACEHOLDER: &str = "_____";

const WORD_SEPARATOR: char = ' ';

// Only the literal space separates words. Tabs and newlines stay inside a
// word, and consecutive spaces produce empty words.
pub fn split_words(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(WORD_SEPARATOR).collect()
}

pub fn count_words(text: &str) -> usize {
    if text.trim().is_empty() {
        0
    } else {
        text.split(WORD_SEPARATOR).count()
    }
}

pub fn join_words<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (i, word) in words.into_iter().enumerate() {
        if i > 0 {
            out.push(WORD_SEPARATOR);
        }
        out.push_str(word);
    }
    out
}

pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Strips a single trailing `\n` or `\r\n`, the way a file or piped stdin
/// usually ends. Anything else is left alone.
pub fn strip_line_ending(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
