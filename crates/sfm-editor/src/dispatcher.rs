//! Routing of modal triggers and user events to the editors
//!
//! The page has a single modal element shared by every field and every
//! editor. Each "shown" event starts a new [`ModalSession`]; the
//! dispatcher hands it to the editor named by the trigger and closes the
//! others, so a late response for the previous opening finds no matching
//! ticket.

use crate::error::{EditorError, Result};
use crate::form_submitter;
use crate::source_editor::SourceEditor;
use crate::state::Completion;
use crate::translation_editor::TranslationEditor;
use crate::version_editor::VersionEditor;
use sfm_domain::{
    FieldBackend, FieldKey, LanguageSuggestion, ModalSession, ModalType, Page, ProvenanceStore,
    RecordId, RecordRef, SaveOutcome, SourceId,
};

/// Data attributes carried by a modal trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAttributes {
    /// `field-str`: DOM id of the field input
    pub field_str: String,
    /// `model-id`: record type
    pub model_id: String,
    /// `model-object-id`: record id, empty for a new record
    pub model_object_id: String,
    /// `modal-type`: which editor to show
    pub modal_type: ModalType,
    /// `language`: language scope, version modal only
    pub language: Option<String>,
}

impl TriggerAttributes {
    /// Read the attributes from `(name, value)` pairs.
    ///
    /// Names are accepted with or without the `data-` prefix and in either
    /// kebab case (`field-str`) or dataset camel case (`fieldStr`).
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut field_str = None;
        let mut model_id = None;
        let mut model_object_id = String::new();
        let mut modal_type = None;
        let mut language = None;

        for (name, value) in pairs {
            match normalize_name(name).as_str() {
                "field-str" => field_str = Some(value.to_string()),
                "model-id" => model_id = Some(value.to_string()),
                "model-object-id" | "field-object-id" => model_object_id = value.to_string(),
                "modal-type" => {
                    modal_type = Some(ModalType::parse(value).ok_or_else(|| {
                        EditorError::InvalidInput(format!("unknown modal type: {}", value))
                    })?)
                }
                "language" | "lang" => {
                    language = Some(value.to_string()).filter(|v| !v.is_empty())
                }
                _ => {}
            }
        }

        Ok(Self {
            field_str: required(field_str, "field-str")?,
            model_id: required(model_id, "model-id")?,
            model_object_id,
            modal_type: modal_type
                .ok_or_else(|| EditorError::InvalidInput("missing modal-type".to_string()))?,
            language,
        })
    }

    /// Field the trigger belongs to
    pub fn field_key(&self) -> FieldKey {
        FieldKey::new(
            RecordRef::new(self.model_id.clone(), RecordId::parse(&self.model_object_id)),
            self.field_str.clone(),
        )
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EditorError::InvalidInput(format!("missing {}", name)))
}

fn normalize_name(name: &str) -> String {
    let name = name.strip_prefix("data-").unwrap_or(name);
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else if c == '_' {
            out.push('-');
        } else {
            out.push(c);
        }
    }
    out
}

/// Owns the page state and drives the three editors
pub struct ModalDispatcher<B, P> {
    store: ProvenanceStore,
    backend: B,
    page: P,
    generation: u64,
    active: Option<ModalSession>,
    sources: SourceEditor,
    versions: VersionEditor,
    translations: TranslationEditor,
}

impl<B: FieldBackend, P: Page> ModalDispatcher<B, P> {
    /// Create a dispatcher for one page
    pub fn new(backend: B, page: P, page_lang: impl Into<String>) -> Self {
        Self {
            store: ProvenanceStore::new(),
            backend,
            page,
            generation: 0,
            active: None,
            sources: SourceEditor::new(),
            versions: VersionEditor::new(page_lang),
            translations: TranslationEditor::new(),
        }
    }

    /// Provenance gathered so far
    pub fn store(&self) -> &ProvenanceStore {
        &self.store
    }

    /// Backend in use
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Hosting page
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Hosting page, mutably (for input changes made outside the modal)
    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Session of the open modal
    pub fn active(&self) -> Option<&ModalSession> {
        self.active.as_ref()
    }

    /// Source editor
    pub fn source_editor(&self) -> &SourceEditor {
        &self.sources
    }

    /// Version editor
    pub fn version_editor(&self) -> &VersionEditor {
        &self.versions
    }

    /// Translation editor
    pub fn translation_editor(&self) -> &TranslationEditor {
        &self.translations
    }

    /// Load the sources of every field trigger on the page
    pub async fn preload(&mut self, keys: &[FieldKey]) -> usize {
        SourceEditor::preload(&mut self.store, &self.backend, keys).await
    }

    /// Start a new session for a trigger without fetching anything.
    ///
    /// Every editor is closed first, so responses still in flight for the
    /// previous session are dropped when they arrive.
    pub fn start_session(&mut self, attrs: &TriggerAttributes) -> ModalSession {
        self.close();
        self.generation += 1;

        let mut session = ModalSession::new(attrs.field_key(), attrs.modal_type, self.generation);
        if attrs.modal_type == ModalType::Version {
            session.language = attrs.language.clone();
        }
        tracing::debug!(
            "Opening {} modal for {} (generation {})",
            session.modal_type,
            session.field_key,
            session.generation
        );
        self.active = Some(session.clone());
        session
    }

    /// Handle the modal's "shown" event: start a session and load the editor
    pub async fn on_shown(&mut self, attrs: &TriggerAttributes) -> Result<Completion> {
        let session = self.start_session(attrs);
        match session.modal_type {
            ModalType::Source => {
                self.sources
                    .open(&mut self.store, &self.backend, session)
                    .await
            }
            ModalType::Version => {
                self.versions
                    .open(&mut self.store, &self.backend, session)
                    .await
            }
            ModalType::Translate => {
                self.translations
                    .open(&mut self.store, &self.backend, session)
                    .await
            }
        }
    }

    /// Handle the modal being hidden
    pub fn close(&mut self) {
        self.active = None;
        self.sources.close();
        self.versions.close();
        self.translations.close();
    }

    /// Add a citation in the source modal
    pub fn add_source(&mut self, text: &str, confidence: &str) -> Result<SourceId> {
        self.expect_modal(ModalType::Source)?;
        self.sources.add_source(&mut self.store, text, confidence)
    }

    /// Delete a citation in the source modal
    pub fn delete_source(&mut self, id: &str) -> Result<bool> {
        self.expect_modal(ModalType::Source)?;
        self.sources.delete_source(&mut self.store, id)
    }

    /// Change the field confidence in the source modal
    pub fn set_confidence(&mut self, code: &str) -> Result<()> {
        self.expect_modal(ModalType::Source)?;
        self.sources.set_confidence(&mut self.store, code)
    }

    /// Change the language of the version modal
    pub async fn change_language(&mut self, language: &str) -> Result<Completion> {
        self.expect_modal(ModalType::Version)?;
        self.versions
            .change_language(&mut self.store, &self.backend, language)
            .await
    }

    /// Revert to a version from the version modal
    pub async fn revert(&mut self, version_id: &str) -> Result<()> {
        self.expect_modal(ModalType::Version)?;
        self.versions
            .revert(&self.backend, &mut self.page, version_id)
            .await
    }

    /// Add a translation from the translation modal
    pub async fn add_translation(&mut self, language: &str, value: &str) -> Result<Completion> {
        self.expect_modal(ModalType::Translate)?;
        self.translations.edit_draft(language, value);
        self.translations
            .add_translation(&mut self.store, &self.backend)
            .await
    }

    /// Language suggestions for the translation modal
    pub async fn suggest_languages(&self, term: &str) -> Result<Vec<LanguageSuggestion>> {
        self.expect_modal(ModalType::Translate)?;
        self.translations
            .suggest_languages(&self.backend, term)
            .await
    }

    /// Save a record with everything gathered for it
    pub async fn save(&mut self, record: &RecordRef) -> Result<SaveOutcome> {
        form_submitter::submit(&self.store, &self.backend, &mut self.page, record).await
    }

    fn expect_modal(&self, expected: ModalType) -> Result<()> {
        match &self.active {
            None => Err(EditorError::NoSession),
            Some(session) if session.modal_type != expected => Err(EditorError::WrongModal {
                expected,
                open: session.modal_type,
            }),
            Some(_) => Ok(()),
        }
    }
}
