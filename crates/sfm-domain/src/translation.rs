//! Language translations of a field value

/// A language-tagged alternate value for a field.
///
/// Language values are free text; only the backend validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Language code or name as entered
    pub language: String,
    /// Translated value
    pub value: String,
}

impl Translation {
    /// Create a translation
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// One entry of the language autocomplete list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSuggestion {
    /// Text shown in the dropdown
    pub label: String,
    /// Value written into the input when chosen
    pub value: String,
}
