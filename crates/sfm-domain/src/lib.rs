//! SFM Domain Layer
//!
//! Core model of the field provenance editor used on Security Force Monitor
//! person and organization records. Every editable field of a record can
//! carry source citations with a confidence level, translations into other
//! languages, and a version history. This crate holds that model and the
//! page-scoped store it lives in.
//!
//! ## Key Concepts
//!
//! - **FieldKey**: `(record, field name)` address of one field's data
//! - **ProvenanceStore**: lazily populated map from FieldKey to entry
//! - **SourceCitation**: evidence text with a confidence level
//! - **Temporary id**: client placeholder (`_0`, `_1`, ...) for unsaved citations
//! - **ModalSession**: one opening of the shared modal dialog
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Network and page access only through the traits in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod citation;
pub mod confidence;
pub mod field_key;
pub mod provenance;
pub mod session;
pub mod store;
pub mod submission;
pub mod traits;
pub mod translation;
pub mod version;
pub mod view;

// Re-exports for convenience
pub use citation::{SourceCitation, SourceId, TEMPORARY_ID_PREFIX};
pub use confidence::{confidence_label, Confidence, CONFIDENCE_PLACEHOLDER};
pub use field_key::{FieldKey, RecordId, RecordRef};
pub use provenance::ProvenanceEntry;
pub use session::{ModalSession, ModalType};
pub use store::{FieldKeyIndex, ProvenanceStore};
pub use submission::{FieldSubmission, RecordPayload, SaveOutcome, SourceListing, SubmittedSource};
pub use traits::{FieldBackend, Page};
pub use translation::{LanguageSuggestion, Translation};
pub use version::{RevertRequest, VersionRecord};
pub use view::{SourceListView, SourceRow, TranslationListView, VersionRow, VersionTableView};
