//! The modal currently open on the page

use crate::FieldKey;
use std::fmt;

/// Which editor a modal trigger asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalType {
    /// Source list with confidence
    Source,
    /// Version history with revert
    Version,
    /// Translations
    Translate,
}

impl ModalType {
    /// Name used in the `modal-type` data attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalType::Source => "source",
            ModalType::Version => "version",
            ModalType::Translate => "translate",
        }
    }

    /// Parse a `modal-type` attribute
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "source" | "sources" => Some(ModalType::Source),
            "version" | "versions" => Some(ModalType::Version),
            "translate" | "translation" | "translations" => Some(ModalType::Translate),
            _ => None,
        }
    }
}

impl std::str::FromStr for ModalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid modal type: {}", s))
    }
}

impl fmt::Display for ModalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One opening of the shared modal.
///
/// A fresh session is created every time a trigger's "shown" event fires.
/// The generation increases with each opening so responses to requests
/// issued for an earlier opening can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSession {
    /// Field the modal is editing
    pub field_key: FieldKey,
    /// Editor the modal is showing
    pub modal_type: ModalType,
    /// Language scope (version modal only)
    pub language: Option<String>,
    /// Opening counter
    pub generation: u64,
}

impl ModalSession {
    /// Create a session
    pub fn new(field_key: FieldKey, modal_type: ModalType, generation: u64) -> Self {
        Self {
            field_key,
            modal_type,
            language: None,
            generation,
        }
    }

    /// Scope the session to a language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
