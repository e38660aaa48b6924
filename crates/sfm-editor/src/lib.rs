//! SFM modal editors
//!
//! Drives the shared provenance modal of a record form: the source list
//! with its confidence, the version history, the translations, and the
//! final save of the record with the provenance of every field.
//!
//! Editors are generic over [`sfm_domain::FieldBackend`] and
//! [`sfm_domain::Page`], so the same code runs against the HTTP backend,
//! a terminal, or in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use sfm_editor::{ModalDispatcher, TriggerAttributes};
//! # use sfm_domain::{FieldBackend, Page};
//!
//! # async fn run<B: FieldBackend, P: Page>(backend: B, page: P) -> sfm_editor::Result<()> {
//! let mut dispatcher = ModalDispatcher::new(backend, page, "en");
//! let attrs = TriggerAttributes::from_pairs([
//!     ("field-str", "PersonName"),
//!     ("model-id", "person"),
//!     ("model-object-id", "7"),
//!     ("modal-type", "source"),
//! ])?;
//! dispatcher.on_shown(&attrs).await?;
//! dispatcher.add_source("Annual report 2015, p. 4", "3")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod dispatcher;
mod error;
pub mod form_submitter;
mod source_editor;
mod state;
mod translation_editor;
mod version_editor;

pub use dispatcher::{ModalDispatcher, TriggerAttributes};
pub use error::{EditorError, Result};
pub use source_editor::SourceEditor;
pub use state::{Completion, FetchTicket, ModalState};
pub use translation_editor::{TranslationDraft, TranslationEditor};
pub use version_editor::VersionEditor;
