//! Source list and field confidence for one field

use crate::error::{EditorError, Result};
use crate::state::{Completion, FetchTicket, Lifecycle, ModalState};
use sfm_domain::{
    Confidence, FieldBackend, FieldKey, ModalSession, ProvenanceStore, SourceCitation, SourceId,
    SourceListView, SourceListing,
};
use std::fmt::Display;

/// Editor behind the source modal.
///
/// Loads the citations of a field, lets the user add and delete citations
/// and pick a confidence, and keeps the rendered list in step with the
/// store entry.
#[derive(Debug, Default)]
pub struct SourceEditor {
    lifecycle: Lifecycle,
    view: SourceListView,
}

impl SourceEditor {
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
    pub fn view(&self) -> &SourceListView {
        &self.view
    }

    /// Start opening the modal for a field
    pub fn begin_open(&mut self, session: ModalSession) -> FetchTicket {
        self.lifecycle.attach(session)
    }

    /// Apply the answer to a fetch started by [`begin_open`](Self::begin_open).
    ///
    /// On failure the store is left untouched, the last known entry is
    /// rendered and the error is returned.
    pub fn complete_open<E: Display>(
        &mut self,
        store: &mut ProvenanceStore,
        ticket: &FetchTicket,
        result: std::result::Result<SourceListing, E>,
    ) -> Result<Completion> {
        if !self.lifecycle.accept(ticket) {
            return Ok(Completion::Stale);
        }
        match result {
            Ok(listing) => {
                store.get(&ticket.field_key).merge_listing(listing);
                self.lifecycle.set_state(ModalState::Ready);
                self.render(store);
                Ok(Completion::Applied)
            }
            Err(e) => {
                tracing::warn!("Failed to load sources for {}: {}", ticket.field_key, e);
                self.lifecycle.fail(e.to_string());
                self.render(store);
                Err(EditorError::backend(e))
            }
        }
    }

    /// Open the modal for a field and load its sources
    pub async fn open<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
        session: ModalSession,
    ) -> Result<Completion> {
        let ticket = self.begin_open(session);
        let result = backend.fetch_sources(&ticket.field_key).await;
        self.complete_open(store, &ticket, result)
    }

    /// Append a citation with a client-side id and return that id
    pub fn add_source(
        &mut self,
        store: &mut ProvenanceStore,
        text: &str,
        confidence: &str,
    ) -> Result<SourceId> {
        let key = self.lifecycle.require()?.field_key.clone();
        let text = text.trim();
        if text.is_empty() {
            return Err(EditorError::InvalidInput(
                "source text must not be empty".to_string(),
            ));
        }

        let id = store.next_temporary_id();
        store.get(&key).add_source(SourceCitation::new(
            id.clone(),
            text,
            Confidence::from_code(confidence),
        ));
        tracing::debug!("Added source {} to {}", id, key);
        self.render(store);
        Ok(id)
    }

    /// Remove a citation by the id shown in its row.
    /// Returns false, leaving the list as it was, if no citation matched.
    pub fn delete_source(&mut self, store: &mut ProvenanceStore, id: &str) -> Result<bool> {
        let key = self.lifecycle.require()?.field_key.clone();
        let removed = store.get(&key).remove_source(&SourceId::parse(id));
        if removed {
            tracing::debug!("Deleted source {} from {}", id, key);
        }
        self.render(store);
        Ok(removed)
    }

    /// Set the field confidence from the select control's code
    pub fn set_confidence(&mut self, store: &mut ProvenanceStore, code: &str) -> Result<()> {
        let key = self.lifecycle.require()?.field_key.clone();
        store.get(&key).set_confidence(Confidence::from_code(code));
        self.render(store);
        Ok(())
    }

    /// Rebuild the list from the store entry of the open field
    pub fn render(&mut self, store: &ProvenanceStore) -> &SourceListView {
        self.view = self
            .lifecycle
            .session()
            .and_then(|s| store.peek(&s.field_key))
            .map(SourceListView::from_entry)
            .unwrap_or_default();
        &self.view
    }

    /// Close the modal, keeping the store as it is
    pub fn close(&mut self) {
        self.lifecycle.close();
        self.view = SourceListView::default();
    }

    /// Load the sources of every field on the page before any modal opens.
    ///
    /// Failures are logged and skipped. Returns the number of fields loaded.
    pub async fn preload<B: FieldBackend>(
        store: &mut ProvenanceStore,
        backend: &B,
        keys: &[FieldKey],
    ) -> usize {
        let mut loaded = 0;
        for key in keys {
            match backend.fetch_sources(key).await {
                Ok(listing) => {
                    store.get(key).merge_listing(listing);
                    loaded += 1;
                }
                Err(e) => tracing::warn!("Failed to preload sources for {}: {}", key, e),
            }
        }
        tracing::debug!("Preloaded sources for {}/{} fields", loaded, keys.len());
        loaded
    }
}
