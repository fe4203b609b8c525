use crate::types::{NormalizedWord, WordRecord};

/// Reduce a word to its comparison key: lower-cased, with every character
/// outside `[A-Za-z0-9_]` removed. This is a deliberately ASCII-oriented
/// word-character definition; non-ASCII letters are stripped, not folded.
pub fn normalize_key(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Map raw word records to comparison keys, timestamps copied through.
/// Order- and length-preserving; index `n` of the output always corresponds
/// to index `n` of the input.
pub fn normalize_words(words: &[WordRecord]) -> Vec<NormalizedWord> {
    words
        .iter()
        .map(|record| NormalizedWord {
            key: normalize_key(&record.text),
            start: record.start,
            end: record.end,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, start: f64, end: f64) -> WordRecord {
        WordRecord {
            text: text.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn key_lowercases_and_strips_punctuation() {
        assert_eq!(normalize_key("Hello,"), "hello");
        assert_eq!(normalize_key("don't"), "dont");
        assert_eq!(normalize_key("WORLD!"), "world");
        assert_eq!(normalize_key("well-known"), "wellknown");
    }

    #[test]
    fn key_keeps_digits_and_underscore() {
        assert_eq!(normalize_key("42nd"), "42nd");
        assert_eq!(normalize_key("foo_bar"), "foo_bar");
    }

    #[test]
    fn key_strips_non_ascii_letters() {
        // No Unicode folding: anything outside the ASCII word class is dropped.
        assert_eq!(normalize_key("café"), "caf");
        assert_eq!(normalize_key("日本"), "");
    }

    #[test]
    fn punctuation_only_word_yields_empty_key() {
        assert_eq!(normalize_key("..."), "");
        assert_eq!(normalize_key("—"), "");
    }

    #[test]
    fn normalize_preserves_order_length_and_timestamps() {
        let input = vec![
            record("Hello,", 0.12, 0.48),
            record("world!", 0.55, 0.9),
            record("...", 1.0, 1.1),
        ];
        let normalized = normalize_words(&input);
        assert_eq!(normalized.len(), input.len());
        assert_eq!(normalized[0].key, "hello");
        assert_eq!(normalized[1].key, "world");
        assert_eq!(normalized[2].key, "");
        for (raw, norm) in input.iter().zip(normalized.iter()) {
            assert_eq!(raw.start, norm.start);
            assert_eq!(raw.end, norm.end);
        }
    }

    #[test]
    fn normalize_empty_input() {
        assert!(normalize_words(&[]).is_empty());
    }
}
