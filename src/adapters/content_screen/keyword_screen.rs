//! Keyword-based content screen.
//!
//! Matches a fixed list of lowercase terms as case-insensitive substrings.
//! "threatening" therefore matches "threat".
//!
//! # Usage
//!
//! ```ignore
//! use conflict_mediator::adapters::content_screen::KeywordContentScreen;
//!
//! let screen = KeywordContentScreen::default();
//! // Or with site-specific additions:
//! let screen = KeywordContentScreen::default().with_extra(["stalk", "blackmail"]);
//! ```

use crate::ports::ContentScreen;

/// Terms refused out of the box.
pub const DEFAULT_FORBIDDEN_KEYWORDS: &[&str] = &[
    "violence",
    "assault",
    "theft",
    "fraud",
    "harassment",
    "abuse",
    "threat",
    "danger",
    "weapon",
    "drugs",
    "hurt",
    "kill",
];

/// Content screen backed by a keyword list.
#[derive(Debug, Clone)]
pub struct KeywordContentScreen {
    keywords: Vec<String>,
}

impl Default for KeywordContentScreen {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN_KEYWORDS.iter().copied())
    }
}

impl KeywordContentScreen {
    /// Creates a screen from an explicit list. Blank entries are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut screen = Self {
            keywords: Vec::new(),
        };
        screen.extend(keywords);
        screen
    }

    /// Adds more terms on top of the current list.
    pub fn with_extra<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(keywords);
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
    }
}

impl ContentScreen for KeywordContentScreen {
    fn first_match(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| lower.contains(keyword.as_str()))
            .map(String::as_str)
    }
}
