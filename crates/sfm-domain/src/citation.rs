//! Source citations

use crate::Confidence;
use std::fmt;

/// Prefix reserved for ids generated on the client before the first save
pub const TEMPORARY_ID_PREFIX: char = '_';

/// Identifier of a source citation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Opaque id assigned by the server
    Server(String),
    /// Client placeholder, rendered as `_<n>`
    Temporary(u64),
}

impl SourceId {
    /// Parse an id as it appears in a rendered list row
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(TEMPORARY_ID_PREFIX) {
            Some(n) => match n.parse() {
                Ok(n) => SourceId::Temporary(n),
                Err(_) => SourceId::Server(raw.to_string()),
            },
            None => SourceId::Server(raw.to_string()),
        }
    }

    /// Whether the id was generated on the client
    pub fn is_temporary(&self) -> bool {
        matches!(self, SourceId::Temporary(_))
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Server(id) => f.write_str(id),
            SourceId::Temporary(n) => write!(f, "{}{}", TEMPORARY_ID_PREFIX, n),
        }
    }
}

/// An evidence reference attached to a field value
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCitation {
    /// Citation id
    pub id: SourceId,
    /// Free-text citation
    pub text: String,
    /// Confidence in this citation
    pub confidence: Confidence,
}

impl SourceCitation {
    /// Create a citation
    pub fn new(id: SourceId, text: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            id,
            text: text.into(),
            confidence,
        }
    }
}
