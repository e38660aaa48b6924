//! Translations of one field

use crate::error::{EditorError, Result};
use crate::state::{Completion, FetchTicket, Lifecycle, ModalState};
use sfm_domain::{
    FieldBackend, LanguageSuggestion, ModalSession, ProvenanceStore, Translation,
    TranslationListView,
};
use std::fmt::Display;

/// The language and value inputs of the translation modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationDraft {
    /// Language name or code typed by the user
    pub language: String,
    /// Translated value
    pub value: String,
}

impl TranslationDraft {
    /// Whether both inputs are blank
    pub fn is_empty(&self) -> bool {
        self.language.is_empty() && self.value.is_empty()
    }
}

/// Editor behind the translation modal.
///
/// Additions are not applied locally: after the server accepts one the
/// inputs are cleared and the list is fetched again.
#[derive(Debug, Default)]
pub struct TranslationEditor {
    lifecycle: Lifecycle,
    view: TranslationListView,
    draft: TranslationDraft,
}

impl TranslationEditor {
    /// Create a closed editor
    pub fn new() -> Self {
        Self::default()
    }

    /// Session of the open modal
    pub fn session(&self) -> Option<&ModalSession> {
        self.lifecycle.session()
    }

    /// Lifecycle state
    pub fn state(&self) -> &ModalState {
        self.lifecycle.state()
    }

    /// Last rendered list
    pub fn view(&self) -> &TranslationListView {
        &self.view
    }

    /// Current input values
    pub fn draft(&self) -> &TranslationDraft {
        &self.draft
    }

    /// Update the input values
    pub fn edit_draft(&mut self, language: impl Into<String>, value: impl Into<String>) {
        self.draft = TranslationDraft {
            language: language.into(),
            value: value.into(),
        };
    }

    /// Start opening the modal for a field
    pub fn begin_open(&mut self, session: ModalSession) -> FetchTicket {
        self.lifecycle.attach(session)
    }

    /// Apply the answer to a translation fetch
    pub fn complete_open<E: Display>(
        &mut self,
        store: &mut ProvenanceStore,
        ticket: &FetchTicket,
        result: std::result::Result<Vec<Translation>, E>,
    ) -> Result<Completion> {
        if !self.lifecycle.accept(ticket) {
            return Ok(Completion::Stale);
        }
        match result {
            Ok(translations) => {
                store.get(&ticket.field_key).replace_translations(translations);
                self.lifecycle.set_state(ModalState::Ready);
                self.render(store);
                Ok(Completion::Applied)
            }
            Err(e) => {
                tracing::warn!("Failed to load translations for {}: {}", ticket.field_key, e);
                self.lifecycle.fail(e.to_string());
                self.render(store);
                Err(EditorError::backend(e))
            }
        }
    }

    /// Open the modal for a field and load its translations
    pub async fn open<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
        session: ModalSession,
    ) -> Result<Completion> {
        let ticket = self.begin_open(session);
        self.fetch(store, backend, ticket).await
    }

    /// Send the draft to the server; on success clear it and reload the list
    pub async fn add_translation<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
    ) -> Result<Completion> {
        let key = self.lifecycle.require()?.field_key.clone();
        let language = self.draft.language.trim();
        if language.is_empty() {
            return Err(EditorError::InvalidInput(
                "translation language must not be empty".to_string(),
            ));
        }
        let translation = Translation::new(language, self.draft.value.clone());

        self.lifecycle.set_state(ModalState::Mutating);
        if let Err(e) = backend.add_translation(&key, &translation).await {
            tracing::warn!("Failed to add {} translation for {}: {}", translation.language, key, e);
            self.lifecycle.fail(e.to_string());
            return Err(EditorError::backend(e));
        }

        tracing::info!("Added {} translation for {}", translation.language, key);
        self.draft = TranslationDraft::default();
        let ticket = self.lifecycle.issue()?;
        self.fetch(store, backend, ticket).await
    }

    /// Language names matching what the user has typed so far
    pub async fn suggest_languages<B: FieldBackend>(
        &self,
        backend: &B,
        term: &str,
    ) -> Result<Vec<LanguageSuggestion>> {
        backend
            .autocomplete_languages(term)
            .await
            .map_err(EditorError::backend)
    }

    /// Rebuild the list from the store entry of the open field
    pub fn render(&mut self, store: &ProvenanceStore) -> &TranslationListView {
        self.view = self
            .lifecycle
            .session()
            .and_then(|s| store.peek(&s.field_key))
            .map(|entry| TranslationListView::from_translations(&entry.translations))
            .unwrap_or_default();
        &self.view
    }

    /// Close the modal; the draft is discarded
    pub fn close(&mut self) {
        self.lifecycle.close();
        self.view = TranslationListView::default();
        self.draft = TranslationDraft::default();
    }

    async fn fetch<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
        ticket: FetchTicket,
    ) -> Result<Completion> {
        let result = backend.fetch_translations(&ticket.field_key).await;
        self.complete_open(store, &ticket, result)
    }
}
