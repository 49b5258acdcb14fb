//! Résumé text normalization.
//!
//! An ordered list of regex substitutions folded over the input. Order is
//! load-bearing: hashtags and mentions are removed while their `#` / `@`
//! delimiters still exist, and non-ASCII is blanked only after the token
//! rules have matched.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// Characters blanked by the punctuation rule.
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

pub struct CleanRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl CleanRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("cleaning patterns are static and valid"),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(self.replacement))
            .into_owned()
    }
}

/// The rules in application order.
pub fn rules() -> &'static [CleanRule] {
    static RULES: OnceLock<Vec<CleanRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            CleanRule::new("url", r"http\S+\s", " "),
            CleanRule::new("retweet_cc", r"RT|cc", " "),
            CleanRule::new("hashtag", r"#\S+\s", " "),
            CleanRule::new("mention", r"@\S+", "  "),
            CleanRule::new(
                "punctuation",
                &format!("[{}]", regex::escape(PUNCTUATION)),
                " ",
            ),
            CleanRule::new("non_ascii", r"[^\x00-\x7F]", " "),
            CleanRule::new("whitespace", r"\s+", " "),
        ]
    })
}

pub fn clean(text: &str) -> String {
    rules()
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}
