// In-process sentiment and summary used when the MCP server is unavailable

use agora_core::text::{truncate_chars, MAX_SUMMARY_CHARS};

const POSITIVE: &[&str] = &[
    "amazing", "awesome", "best", "better", "brilliant", "celebrate", "delighted", "enjoy",
    "enjoyed", "excellent", "excited", "fantastic", "glad", "good", "great", "happy", "helpful",
    "impressive", "love", "loved", "nice", "perfect", "pleased", "proud", "recommend", "smooth",
    "success", "thanks", "thrilled", "win", "wonderful",
];

const NEGATIVE: &[&str] = &[
    "angry", "annoying", "awful", "bad", "broken", "bug", "crash", "disappointed",
    "disappointing", "fail", "failed", "failure", "frustrated", "frustrating", "hate", "hated",
    "horrible", "issue", "poor", "problem", "sad", "slow", "terrible", "unhappy", "upset",
    "useless", "worse", "worst", "wrong",
];

const NEGATORS: &[&str] = &["not", "no", "never", "isn't", "wasn't", "don't", "didn't", "can't"];

/// Label text `POSITIVE`, `NEGATIVE` or `NEUTRAL` by counting lexicon hits.
///
/// A negator directly before a hit flips its polarity.
pub fn classify_sentiment(text: &str) -> &'static str {
    let mut score = 0i32;
    let mut negated = false;

    for word in text
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        let polarity = if POSITIVE.contains(&word.as_str()) {
            1
        } else if NEGATIVE.contains(&word.as_str()) {
            -1
        } else {
            0
        };

        if polarity != 0 {
            score += if negated { -polarity } else { polarity };
        }
        negated = NEGATORS.contains(&word.as_str());
    }

    match score {
        s if s > 0 => "POSITIVE",
        s if s < 0 => "NEGATIVE",
        _ => "NEUTRAL",
    }
}

/// Leading sentences of `text` that fit in the summary limit.
///
/// A first sentence longer than the limit is cut at a char boundary.
pub fn summarize(text: &str) -> String {
    let text = text.trim();
    let mut summary = String::new();

    for sentence in sentences(text).take(3) {
        let extra = if summary.is_empty() { 0 } else { 1 };
        if summary.chars().count() + extra + sentence.chars().count() > MAX_SUMMARY_CHARS {
            break;
        }
        if extra == 1 {
            summary.push(' ');
        }
        summary.push_str(sentence);
    }

    if summary.is_empty() {
        truncate_chars(text, MAX_SUMMARY_CHARS).trim_end().to_string()
    } else {
        summary
    }
}

/// Split on `.`, `!` or `?` followed by whitespace, keeping the terminator.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }

        let mut chars = rest.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            if matches!(c, '.' | '!' | '?') {
                if let Some(&(next_idx, next)) = chars.peek() {
                    if next.is_whitespace() {
                        let sentence = &rest[..idx + c.len_utf8()];
                        rest = &rest[next_idx..];
                        return Some(sentence);
                    }
                }
            }
        }

        let sentence = rest;
        rest = "";
        Some(sentence)
    })
}
