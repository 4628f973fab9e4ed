//! Mention normalization
//!
//! Equivalent mentions must compare equal as plain strings, so matched
//! fragments are scrubbed of incidental code points and trailing
//! punctuation before they are recorded.

use lexgraph_core::ExtractionConfig;

/// Characters stripped from the end of a mention, besides whitespace
const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', ';', '"', '[', ']'];

/// Replaces incidental code points and trims trailing terminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    ignored: Vec<char>,
}

impl Normalizer {
    /// Normalizer with the default incidental character set
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            ignored: config.ignored_chars.clone(),
        }
    }

    /// Replace each incidental character with a single space
    pub fn scrub(&self, text: &str) -> String {
        if !text.chars().any(|c| self.ignored.contains(&c)) {
            return text.to_string();
        }

        text.chars()
            .map(|c| if self.ignored.contains(&c) { ' ' } else { c })
            .collect()
    }

    /// Scrub incidental characters, then strip trailing terminators
    ///
    /// Idempotent: normalizing a normalized mention returns it unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        strip_trailing(&self.scrub(raw)).to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(c: char) -> bool {
    c == ':' || c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c)
}

/// Remove every trailing `. , ; " [ ] :` and whitespace character
pub fn strip_trailing(s: &str) -> &str {
    s.trim_end_matches(is_terminator)
}

/// Replace each run of newlines with a single space
///
/// Table rows are line-delimited, so a wrapped citation must be flattened
/// before it is written.
pub fn collapse_newlines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;

    for c in s.chars() {
        if c == '\n' {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_trailing_terminators() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("קבלן. ,"), "קבלן");
        assert_eq!(normalizer.normalize("קבע;\n"), "קבע");
        assert_eq!(normalizer.normalize("סעיף [א]:\"\t"), "סעיף [א");
    }

    #[test]
    fn test_interior_and_leading_kept() {
        let normalizer = Normalizer::new();
        assert_eq!(
            normalizer.normalize(". חוק, התשכ\"ה-1965"),
            ". חוק, התשכ\"ה-1965"
        );
    }

    #[test]
    fn test_incidental_chars_become_spaces() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.scrub("מפקח\u{2003}העבודה"), "מפקח העבודה");
        assert_eq!(normalizer.scrub("a\u{03bc}b\u{00fc}c"), "a b c");
        // A trailing incidental character is stripped like any whitespace
        assert_eq!(normalizer.normalize("קבלן\u{00fc}"), "קבלן");
    }

    #[test]
    fn test_custom_ignored_chars() {
        let config = ExtractionConfig {
            ignored_chars: vec!['\u{200f}'],
            ..Default::default()
        };
        let normalizer = Normalizer::from_config(&config);
        assert_eq!(normalizer.normalize("קבלן\u{200f}קבע"), "קבלן קבע");
        assert_eq!(normalizer.normalize("\u{03bc}"), "\u{03bc}");
    }

    #[test]
    fn test_empty_and_all_terminators() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize(" .,;:\"[]\n"), "");
    }

    #[test]
    fn test_collapse_newlines() {
        assert_eq!(collapse_newlines("חוק\n\n\nהתכנון"), "חוק התכנון");
        assert_eq!(collapse_newlines("a\nb\r\nc"), "a b\r c");
        assert_eq!(collapse_newlines("no breaks"), "no breaks");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "\\PC*") {
            let normalizer = Normalizer::new();
            let once = normalizer.normalize(&s);
            prop_assert_eq!(normalizer.normalize(&once), once.clone());
        }

        #[test]
        fn prop_normalize_handles_mixed_input(s in "[א-ת .,;:\"\\[\\]\n\u{2003}\u{03bc}\u{00fc}a-z]{0,40}") {
            let normalizer = Normalizer::new();
            let out = normalizer.normalize(&s);
            prop_assert!(!out.ends_with(is_terminator));
            prop_assert!(
                !out.contains(['\u{2003}', '\u{03bc}', '\u{00fc}']),
                "incidental character left in {:?}",
                out
            );
            prop_assert_eq!(normalizer.normalize(&out), out);
        }
    }
}
