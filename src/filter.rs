use anyhow::{Result, anyhow};
use regex::{Regex, RegexBuilder};

/// Animal and ecology terms, plus a degree qualifier, that flag a posting as
/// relevant.
pub const KEYWORDS: &[&str] = &[
    "reptile",
    "amphibian",
    "herp",
    "turtle",
    "toad",
    "frog",
    "seal",
    "island",
    "whale",
    "cetacean",
    "tortoise",
    "spatial ecology",
    "predator",
    "tropical",
    "hawaii",
    "bear",
    "lion",
    "snake",
    "lizard",
    "alligator",
    "crocodile",
    "M.S.",
];

/// Whole-word, case-insensitive matcher with an optional trailing "s" per
/// keyword. Keyword text lands in the pattern verbatim, so the dots in
/// "M.S." match any character.
pub struct KeywordFilter {
    patterns: Vec<(&'static str, Regex)>,
}

impl KeywordFilter {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(KEYWORDS.len());
        for keyword in KEYWORDS {
            let pattern = RegexBuilder::new(&format!(r"\b{}s?\b", keyword))
                .case_insensitive(true)
                .build()
                .map_err(|e| anyhow!("Invalid keyword pattern '{}': {}", keyword, e))?;
            patterns.push((*keyword, pattern));
        }
        Ok(Self { patterns })
    }

    /// Keywords found anywhere in `text`, in list order. Empty means the
    /// posting is not relevant.
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(keyword, _)| (*keyword).to_string())
            .collect()
    }
}
