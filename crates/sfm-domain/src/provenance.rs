//! Provenance data held for one form field

use crate::{Confidence, SourceCitation, SourceId, SourceListing, Translation, VersionRecord};

/// Everything the modals know about one field: its sources, the overall
/// confidence, its translations and its version history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProvenanceEntry {
    /// Source citations in display order
    pub sources: Vec<SourceCitation>,

    /// Confidence chosen for the field as a whole
    pub confidence: Confidence,

    /// Known translations
    pub translations: Vec<Translation>,

    /// Version history, newest first as returned by the server
    pub versions: Vec<VersionRecord>,

    /// Server citations deleted on this page, kept out of later reloads
    removed: Vec<SourceId>,

    /// Whether the confidence was chosen on this page
    confidence_edited: bool,
}

impl ProvenanceEntry {
    /// Create an empty entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been loaded or entered for the field
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
            && !self.confidence.is_set()
            && self.translations.is_empty()
            && self.versions.is_empty()
    }

    /// Append a citation
    pub fn add_source(&mut self, citation: SourceCitation) {
        self.sources.push(citation);
    }

    /// Remove the citation with the given id. Returns false if there was none.
    pub fn remove_source(&mut self, id: &SourceId) -> bool {
        let before = self.sources.len();
        self.sources.retain(|s| &s.id != id);
        let removed = self.sources.len() != before;
        if removed && !id.is_temporary() && !self.removed.contains(id) {
            self.removed.push(id.clone());
        }
        removed
    }

    /// Merge a server listing into the entry.
    ///
    /// Server citations replace the previously loaded ones, except those
    /// deleted on this page; citations added on this page (temporary ids)
    /// stay after them. The listing's confidence is applied unless the user
    /// already picked one.
    pub fn merge_listing(&mut self, listing: SourceListing) {
        let local: Vec<SourceCitation> = self
            .sources
            .drain(..)
            .filter(|s| s.id.is_temporary())
            .collect();
        self.sources = listing
            .sources
            .into_iter()
            .filter(|s| !self.removed.contains(&s.id))
            .chain(local)
            .collect();

        if let Some(confidence) = listing.confidence {
            if !self.confidence_edited {
                self.confidence = confidence;
            }
        }
    }

    /// Overwrite the field confidence with the user's choice
    pub fn set_confidence(&mut self, confidence: Confidence) {
        self.confidence = confidence;
        self.confidence_edited = true;
    }

    /// Replace the translation list
    pub fn replace_translations(&mut self, translations: Vec<Translation>) {
        self.translations = translations;
    }

    /// Replace the version list
    pub fn replace_versions(&mut self, versions: Vec<VersionRecord>) {
        self.versions = versions;
    }

    /// Drop all versions, used while a different language is being fetched
    pub fn clear_versions(&mut self) {
        self.versions.clear();
    }

    /// Whether any citation still carries a client-generated id
    pub fn has_temporary_sources(&self) -> bool {
        self.sources.iter().any(|s| s.id.is_temporary())
    }
}
