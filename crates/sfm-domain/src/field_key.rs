//! Addressing for per-field provenance data

use std::fmt;

/// Identifier of the record being edited.
///
/// A record that has not been saved yet has no server id. Pages render that
/// case as an empty attribute, `"None"` or `0`; all three map to
/// [`RecordId::New`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// Not yet persisted
    New,
    /// Server-assigned id
    Persisted(String),
}

impl RecordId {
    /// Parse the `model-object-id` attribute of a page or modal trigger
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "None" | "0" => RecordId::New,
            id => RecordId::Persisted(id.to_string()),
        }
    }

    /// Whether the record has been saved at least once
    pub fn is_new(&self) -> bool {
        matches!(self, RecordId::New)
    }

    /// Segment used in lookup paths (`/source/...`, `/version/...`)
    pub fn path_segment(&self) -> &str {
        match self {
            RecordId::New => "0",
            RecordId::Persisted(id) => id,
        }
    }

    /// Segment used in the save URL: `add` for a record that does not exist yet
    pub fn save_segment(&self) -> &str {
        match self {
            RecordId::New => "add",
            RecordId::Persisted(id) => id,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A record instance: its type (`person`, `organization`, ...) and id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    /// Record type as used in URLs
    pub record_type: String,
    /// Record id
    pub record_id: RecordId,
}

impl RecordRef {
    /// Create a record reference
    pub fn new(record_type: impl Into<String>, record_id: RecordId) -> Self {
        Self {
            record_type: record_type.into(),
            record_id,
        }
    }
}

/// Address of one editable form field's provenance data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    /// Record the field belongs to
    pub record: RecordRef,
    /// Unique DOM identifier of the field's input
    pub field_name: String,
}

impl FieldKey {
    /// Create a field key
    pub fn new(record: RecordRef, field_name: impl Into<String>) -> Self {
        Self {
            record,
            field_name: field_name.into(),
        }
    }

    /// Record type shortcut
    pub fn record_type(&self) -> &str {
        &self.record.record_type
    }

    /// Record id shortcut
    pub fn record_id(&self) -> &RecordId {
        &self.record.record_id
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.record.record_type, self.record.record_id, self.field_name
        )
    }
}
