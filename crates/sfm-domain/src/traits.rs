//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the editors and the outside
//! world: the HTTP backend that owns persistence, and the page that owns
//! form inputs, inline error slots and navigation.

// The editors are driven from a single task and never spawn, so the
// futures returned by the backend do not need a `Send` bound.
#![allow(async_fn_in_trait)]

use crate::{
    FieldKey, LanguageSuggestion, RecordPayload, RecordRef, RevertRequest, SaveOutcome,
    SourceListing, Translation, VersionRecord,
};

/// Backend holding the authoritative copy of every field.
///
/// Implemented by the HTTP layer (sfm-client) and by in-memory fakes in
/// tests.
pub trait FieldBackend {
    /// Error type for backend operations
    type Error: std::fmt::Display;

    /// Sources and confidence for a field
    async fn fetch_sources(&self, key: &FieldKey) -> Result<SourceListing, Self::Error>;

    /// Version history for a field, optionally limited to one language
    async fn fetch_versions(
        &self,
        key: &FieldKey,
        language: Option<&str>,
    ) -> Result<Vec<VersionRecord>, Self::Error>;

    /// Ask the server to restore a previous version
    async fn revert_version(
        &self,
        key: &FieldKey,
        request: &RevertRequest,
    ) -> Result<(), Self::Error>;

    /// Translations of a field
    async fn fetch_translations(&self, key: &FieldKey) -> Result<Vec<Translation>, Self::Error>;

    /// Store a new translation
    async fn add_translation(
        &self,
        key: &FieldKey,
        translation: &Translation,
    ) -> Result<(), Self::Error>;

    /// Language names matching a partial input
    async fn autocomplete_languages(
        &self,
        term: &str,
    ) -> Result<Vec<LanguageSuggestion>, Self::Error>;

    /// Save a record with all of its tracked fields
    async fn save_record(
        &self,
        record: &RecordRef,
        payload: &RecordPayload,
    ) -> Result<SaveOutcome, Self::Error>;
}

/// The page hosting the form and the shared modal.
pub trait Page {
    /// Current value of a field's input, `None` if the page has no such input
    fn field_value(&self, field_name: &str) -> Option<String>;

    /// Current location
    fn current_url(&self) -> String;

    /// Remove every inline error message
    fn clear_field_errors(&mut self);

    /// Show an inline error next to a field
    fn show_field_error(&mut self, field_name: &str, message: &str);

    /// Navigate to another URL
    fn navigate(&mut self, url: &str);

    /// Reload the current page
    fn reload(&mut self);
}
