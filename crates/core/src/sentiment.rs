//! Normalization of raw sentiment completions.
//!
//! Models are asked for `{"sentiment", "reason", "confidence"}` JSON but do
//! not always comply. [`parse_sentiment`] accepts anything and always yields
//! a [`SentimentResult`].

use crate::types::SentimentResult;
use serde_json::Value;

/// Keys that may carry the sentiment label, in order of preference.
const LABEL_KEYS: [&str; 3] = ["sentiment", "label", "value"];

/// Parse a raw completion into a sentiment result. Never fails.
pub fn parse_sentiment(raw: &str) -> SentimentResult {
    let raw = raw.trim();

    let fields = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => fields,
        _ => return SentimentResult::label(raw),
    };

    let sentiment = LABEL_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| is_truthy(value))
        .map(stringify)
        .unwrap_or_else(|| raw.to_string());

    SentimentResult {
        sentiment: sentiment.trim().to_string(),
        reason: fields.get("reason").map(|r| stringify(r).trim().to_string()),
        confidence: fields.get("confidence").and_then(coerce_confidence),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_confidence(value: &Value) -> Option<f64> {
    let confidence = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;

    confidence.is_finite().then_some(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_structured_payload() {
        let result =
            parse_sentiment(r#"{"sentiment":"Positive","reason":"great","confidence":"0.87"}"#);

        assert_eq!(result.sentiment, "Positive");
        assert_eq!(result.reason.as_deref(), Some("great"));
        assert_eq!(result.confidence, Some(0.87));
    }

    #[test]
    fn test_non_json_becomes_label() {
        let result = parse_sentiment("not json at all");
        assert_eq!(result, SentimentResult::label("not json at all"));
    }

    #[test]
    fn test_unparsable_confidence_is_dropped() {
        let result = parse_sentiment(r#"{"sentiment":"Negative","confidence":"n/a"}"#);

        assert_eq!(result, SentimentResult::label("Negative"));
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("confidence").is_none());
    }

    #[test]
    fn test_label_fallback_order() {
        assert_eq!(
            parse_sentiment(r#"{"label":"Neutral","value":"Positive"}"#).sentiment,
            "Neutral"
        );
        assert_eq!(
            parse_sentiment(r#"{"sentiment":"","value":" Positive "}"#).sentiment,
            "Positive"
        );
    }

    #[test]
    fn test_object_without_label_uses_raw_text() {
        let raw = r#"  {"reason":"mixed signals"}  "#;
        let result = parse_sentiment(raw);

        assert_eq!(result.sentiment, r#"{"reason":"mixed signals"}"#);
        assert_eq!(result.reason.as_deref(), Some("mixed signals"));
    }

    #[test]
    fn test_non_string_values_are_stringified() {
        let result = parse_sentiment(r#"{"sentiment":1,"reason":42,"confidence":0.5}"#);

        assert_eq!(result.sentiment, "1");
        assert_eq!(result.reason.as_deref(), Some("42"));
        assert_eq!(result.confidence, Some(0.5));
    }

    #[test]
    fn test_non_object_json_becomes_label() {
        assert_eq!(parse_sentiment("[1, 2]").sentiment, "[1, 2]");
        assert_eq!(parse_sentiment(" 0.5 ").sentiment, "0.5");
        assert_eq!(parse_sentiment(r#""Positive""#).sentiment, r#""Positive""#);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(parse_sentiment(""), SentimentResult::label(""));
        assert_eq!(parse_sentiment("   \n"), SentimentResult::label(""));
        assert_eq!(parse_sentiment("{{{").sentiment, "{{{");
    }

    #[test]
    fn test_null_confidence_and_nan_are_dropped() {
        assert_eq!(
            parse_sentiment(r#"{"sentiment":"Positive","confidence":null}"#).confidence,
            None
        );
        assert_eq!(
            parse_sentiment(r#"{"sentiment":"Positive","confidence":"NaN"}"#).confidence,
            None
        );
    }
}
