//! Text heuristics applied before and after model calls.

/// Maximum length of a persisted post summary, in characters.
pub const MAX_SUMMARY_CHARS: usize = 500;

const MIN_CONTEXT_CHARS: usize = 15;
const MIN_REPEAT_RUN: usize = 6;
const GENERIC_CONTEXTS: [&str; 7] = [
    "some context",
    "context",
    "test",
    "hello",
    "hi",
    "ok",
    "nothing",
];

/// Outcome of the meaningfulness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaningfulness {
    Meaningful,
    TooShort,
    Generic,
    RepeatedCharacter,
}

impl Meaningfulness {
    pub fn is_meaningful(self) -> bool {
        self == Self::Meaningful
    }
}

/// Decide whether a generation context carries enough information to spend a
/// model call on.
pub fn assess_context(text: &str) -> Meaningfulness {
    let text = text.trim();
    let len = text.chars().count();

    if len < MIN_CONTEXT_CHARS {
        return Meaningfulness::TooShort;
    }

    let lowered = text.to_lowercase();
    if GENERIC_CONTEXTS.contains(&lowered.as_str()) {
        return Meaningfulness::Generic;
    }

    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        if len >= MIN_REPEAT_RUN && chars.all(|c| c == first) {
            return Meaningfulness::RepeatedCharacter;
        }
    }

    Meaningfulness::Meaningful
}

pub fn is_context_meaningful(text: &str) -> bool {
    assess_context(text).is_meaningful()
}

/// Truncate to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
