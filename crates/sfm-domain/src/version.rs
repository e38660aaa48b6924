//! Historical values of a field

use crate::SourceCitation;

/// A previously saved value of a field, as returned by the server.
///
/// Versions are read-only on the client; the only thing a user can do with
/// one is ask the server to revert to it.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRecord {
    /// Version id
    pub id: String,
    /// Field value at that version
    pub value: String,
    /// Sources attached to that value
    pub sources: Vec<SourceCitation>,
    /// Language of the value
    pub language: String,
}

/// Body of a revert request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertRequest {
    /// Language selected in the version modal
    pub lang: String,
    /// Version to restore
    pub id: String,
}
