//! Text processing utilities.
//!
//! Provides normalization, tokenization, sentence splitting, and paragraph
//! counting for the statistics pipeline. Everything here is ASCII-oriented:
//! a word is a run of ASCII letters, and anything outside ASCII is dropped.

/// Sentence terminators recognized by the splitter and the normalizer.
const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Whitespace as the C locale defines it (includes vertical tab).
const fn is_c_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Normalize text for tokenization.
///
/// ASCII letters are lowercased, whitespace and `.`/`!`/`?` are kept, other
/// ASCII punctuation becomes a single space, and everything else (digits,
/// non-ASCII characters) is dropped. Dropping digits joins their neighbours:
/// `"word1word"` normalizes to `"wordword"`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter_map(|ch| {
            if ch.is_ascii_alphabetic() {
                Some(ch.to_ascii_lowercase())
            } else if is_c_space(ch) || is_sentence_terminator(ch) {
                Some(ch)
            } else if ch.is_ascii_punctuation() {
                Some(' ')
            } else {
                None
            }
        })
        .collect()
}

/// Split text into lowercase word tokens, in document order.
///
/// Tokens are separated by whitespace and by sentence terminators, so
/// `"sat."` yields `"sat"`. A token is kept only if it starts with a letter.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|ch: char| is_c_space(ch) || is_sentence_terminator(ch))
        .filter(|w| w.chars().next().is_some_and(|c| c.is_ascii_alphabetic()))
        .map(str::to_owned)
        .collect()
}

/// Split raw text into sentences on `.`, `!`, and `?`.
///
/// Each sentence keeps its terminator and any whitespace that followed the
/// previous terminator. Text after the last terminator becomes a final
/// sentence when it is non-empty.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if is_sentence_terminator(ch) {
            sentences.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

/// Count sentences as the number of terminator characters, at least one.
pub fn count_sentences(text: &str) -> usize {
    text.chars().filter(|&c| is_sentence_terminator(c)).count().max(1)
}

/// Find the sentence with the most tokens.
///
/// Returns the raw sentence and its token count. Ties keep the earlier
/// sentence; text without any tokens yields `("", 0)`.
pub fn longest_sentence(text: &str) -> (String, usize) {
    let mut longest = String::new();
    let mut max_words = 0;

    for sentence in split_sentences(text) {
        let words = tokenize(&sentence).len();
        if words > max_words {
            max_words = words;
            longest = sentence;
        }
    }

    (longest, max_words)
}

/// Count paragraphs as one plus every adjacent `"\n\n"` pair.
///
/// The scan advances one character at a time, so `"\n\n\n"` counts two
/// boundaries.
pub fn count_paragraphs(text: &str) -> usize {
    1 + text
        .as_bytes()
        .windows(2)
        .filter(|pair| *pair == b"\n\n")
        .count()
}
