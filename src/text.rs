//! Comment text normalization
//!
//! Lightweight cleaning for crowd-sourced comment bodies: URLs, inline code
//! spans, and quote lines are noise for both sentiment scoring and quoting.

use regex::Regex;

/// Normalizer holding the compiled cleaning patterns.
///
/// Build one per process and share it read-only; compilation is not free and
/// the patterns never change.
pub struct TextNormalizer {
    url: Regex,
    code: Regex,
    quote: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        TextNormalizer {
            url: Regex::new(r"https?://\S+").expect("valid URL pattern"),
            code: Regex::new(r"`[^`]+`").expect("valid code-span pattern"),
            quote: Regex::new(r"(?m)>+\s.*$").expect("valid quote-line pattern"),
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
        }
    }

    /// Strip URLs, inline code, and quote lines; collapse whitespace
    pub fn clean(&self, text: &str) -> String {
        let text = self.url.replace_all(text, "");
        let text = self.code.replace_all(&text, "");
        let text = self.quote.replace_all(&text, "");
        let text = text.replace('\u{a0}', " ");
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to at most `max_chars` characters (not bytes)
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
