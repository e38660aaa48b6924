//! Values exchanged with the backend when loading and saving fields

use crate::{Confidence, RecordRef, SourceCitation, Translation};
use std::collections::BTreeMap;

/// Sources returned for a field.
///
/// `confidence` is `None` when the response did not carry a field-level
/// confidence (the bare-array response flavour); the entry's current value
/// is then kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceListing {
    /// Citations in server order
    pub sources: Vec<SourceCitation>,
    /// Field confidence, if the response had one
    pub confidence: Option<Confidence>,
}

/// A citation as it is sent on save.
///
/// `id` is `None` for citations the server has never seen; these are
/// written with the "new" sentinel so the server creates them instead of
/// updating an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedSource {
    /// Server id, `None` for new citations
    pub id: Option<String>,
    /// Citation text
    pub text: String,
    /// Citation confidence
    pub confidence: Confidence,
}

/// One field of the save payload
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSubmission {
    /// Current value of the field's input, `None` when the page has no
    /// input for the field and the stored value must be left alone
    pub value: Option<String>,
    /// Citations with temporary ids stripped
    pub sources: Vec<SubmittedSource>,
    /// Field confidence
    pub confidence: Confidence,
    /// Translations known for the field
    pub translations: Vec<Translation>,
}

/// Everything posted when a record is saved
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPayload {
    /// Record being saved
    pub record: RecordRef,
    /// Fields keyed by field name, in first-access order
    pub fields: Vec<(String, FieldSubmission)>,
}

impl RecordPayload {
    /// Create an empty payload for a record
    pub fn new(record: RecordRef) -> Self {
        Self {
            record,
            fields: Vec::new(),
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSubmission> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }
}

/// Server answer to a save
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Record stored; `id` is the record's server id
    Saved {
        /// Record id
        id: String,
    },
    /// Validation failed; messages keyed by field name
    Rejected {
        /// Field errors
        errors: BTreeMap<String, String>,
    },
}
