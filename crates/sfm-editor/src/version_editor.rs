//! Version history of one field, with language scoping and revert

use crate::error::{EditorError, Result};
use crate::state::{Completion, FetchTicket, Lifecycle, ModalState};
use sfm_domain::{
    FieldBackend, ModalSession, Page, ProvenanceStore, RevertRequest, VersionRecord,
    VersionTableView,
};
use std::fmt::Display;

/// Editor behind the version modal
#[derive(Debug)]
pub struct VersionEditor {
    lifecycle: Lifecycle,
    view: VersionTableView,
    page_lang: String,
}

impl VersionEditor {
    /// Create a closed editor. `page_lang` is used when the modal has no
    /// language selected.
    pub fn new(page_lang: impl Into<String>) -> Self {
        Self {
            lifecycle: Lifecycle::default(),
            view: VersionTableView::default(),
            page_lang: page_lang.into(),
        }
    }

    /// Session of the open modal
    pub fn session(&self) -> Option<&ModalSession> {
        self.lifecycle.session()
    }

    /// Lifecycle state
    pub fn state(&self) -> &ModalState {
        self.lifecycle.state()
    }

    /// Last rendered table
    pub fn view(&self) -> &VersionTableView {
        &self.view
    }

    /// Language the modal is scoped to
    pub fn language(&self) -> &str {
        self.lifecycle
            .session()
            .and_then(|s| s.language.as_deref())
            .unwrap_or(&self.page_lang)
    }

    /// Start opening the modal. The session's language, if any, scopes the
    /// fetch.
    pub fn begin_open(&mut self, session: ModalSession) -> FetchTicket {
        self.lifecycle.attach(session)
    }

    /// Apply the answer to a version fetch
    pub fn complete_open<E: Display>(
        &mut self,
        store: &mut ProvenanceStore,
        ticket: &FetchTicket,
        result: std::result::Result<Vec<VersionRecord>, E>,
    ) -> Result<Completion> {
        if !self.lifecycle.accept(ticket) {
            return Ok(Completion::Stale);
        }
        match result {
            Ok(versions) => {
                store.get(&ticket.field_key).replace_versions(versions);
                self.lifecycle.set_state(ModalState::Ready);
                self.render(store);
                Ok(Completion::Applied)
            }
            Err(e) => {
                tracing::warn!("Failed to load versions for {}: {}", ticket.field_key, e);
                self.lifecycle.fail(e.to_string());
                self.render(store);
                Err(EditorError::backend(e))
            }
        }
    }

    /// Open the modal for a field and load its history
    pub async fn open<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
        session: ModalSession,
    ) -> Result<Completion> {
        let ticket = self.begin_open(session);
        self.fetch(store, backend, ticket).await
    }

    /// Rescope the modal to another language.
    ///
    /// The entry's versions and the rendered rows are cleared before the
    /// ticket is handed out, so nothing from the previous language is shown
    /// while the new fetch is pending.
    pub fn begin_change_language(
        &mut self,
        store: &mut ProvenanceStore,
        language: &str,
    ) -> Result<FetchTicket> {
        let session = self.lifecycle.session_mut().ok_or(EditorError::NoSession)?;
        session.language = Some(language.to_string()).filter(|l| !l.is_empty());
        let key = session.field_key.clone();

        store.get(&key).clear_versions();
        self.view = VersionTableView::default();
        self.lifecycle.issue()
    }

    /// Rescope the modal to another language and load that history
    pub async fn change_language<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
        language: &str,
    ) -> Result<Completion> {
        let ticket = self.begin_change_language(store, language)?;
        self.fetch(store, backend, ticket).await
    }

    /// Ask the server to restore a version, then reload the page.
    ///
    /// On failure nothing changes locally and the error is returned.
    pub async fn revert<B: FieldBackend, P: Page>(
        &mut self,
        backend: &B,
        page: &mut P,
        version_id: &str,
    ) -> Result<()> {
        let key = self.lifecycle.require()?.field_key.clone();
        let request = RevertRequest {
            lang: self.language().to_string(),
            id: version_id.to_string(),
        };

        let previous = self.lifecycle.state().clone();
        self.lifecycle.set_state(ModalState::Mutating);
        match backend.revert_version(&key, &request).await {
            Ok(()) => {
                tracing::info!("Reverted {} to version {}", key, version_id);
                self.lifecycle.set_state(ModalState::Ready);
                page.reload();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to revert {} to version {}: {}", key, version_id, e);
                self.lifecycle.set_state(previous);
                Err(EditorError::backend(e))
            }
        }
    }

    /// Rebuild the table from the store entry of the open field
    pub fn render(&mut self, store: &ProvenanceStore) -> &VersionTableView {
        self.view = self
            .lifecycle
            .session()
            .and_then(|s| store.peek(&s.field_key))
            .map(|entry| VersionTableView::from_versions(&entry.versions))
            .unwrap_or_default();
        &self.view
    }

    /// Close the modal
    pub fn close(&mut self) {
        self.lifecycle.close();
        self.view = VersionTableView::default();
    }

    async fn fetch<B: FieldBackend>(
        &mut self,
        store: &mut ProvenanceStore,
        backend: &B,
        ticket: FetchTicket,
    ) -> Result<Completion> {
        let result = backend
            .fetch_versions(&ticket.field_key, ticket.language.as_deref())
            .await;
        self.complete_open(store, &ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfm_domain::{FieldKey, ModalType, RecordId, RecordRef};

    fn session() -> ModalSession {
        let key = FieldKey::new(RecordRef::new("person", RecordId::parse("7")), "PersonName");
        ModalSession::new(key, ModalType::Version, 1)
    }

    fn version(id: &str, value: &str, language: &str) -> VersionRecord {
        VersionRecord {
            id: id.into(),
            value: value.into(),
            sources: vec![],
            language: language.into(),
        }
    }

    #[test]
    fn test_open_keeps_server_order() {
        let mut store = ProvenanceStore::new();
        let mut editor = VersionEditor::new("en");
        let ticket = editor.begin_open(session());

        editor
            .complete_open(
                &mut store,
                &ticket,
                Ok::<_, String>(vec![version("12", "new", "en"), version("11", "old", "en")]),
            )
            .unwrap();

        let ids: Vec<_> = editor.view().rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["12", "11"]);
        assert_eq!(editor.language(), "en");
    }

    #[test]
    fn test_change_language_clears_first() {
        let mut store = ProvenanceStore::new();
        let mut editor = VersionEditor::new("en");
        let english = editor.begin_open(session());
        editor
            .complete_open(&mut store, &english, Ok::<_, String>(vec![version("12", "Juan", "en")]))
            .unwrap();

        let french = editor.begin_change_language(&mut store, "fr").unwrap();
        assert!(editor.view().rows.is_empty());
        assert!(store.peek(&french.field_key).unwrap().versions.is_empty());
        assert_eq!(french.language.as_deref(), Some("fr"));
        assert_eq!(editor.language(), "fr");
        assert_eq!(editor.state(), &ModalState::Loading);
    }

    #[test]
    fn test_late_response_for_old_language_is_dropped() {
        let mut store = ProvenanceStore::new();
        let mut editor = VersionEditor::new("en");
        let english = editor.begin_open(session());
        let french = editor.begin_change_language(&mut store, "fr").unwrap();

        let completion = editor
            .complete_open(&mut store, &english, Ok::<_, String>(vec![version("12", "Juan", "en")]))
            .unwrap();
        assert_eq!(completion, Completion::Stale);
        assert!(editor.view().rows.is_empty());

        editor
            .complete_open(&mut store, &french, Ok::<_, String>(vec![version("20", "Jean", "fr")]))
            .unwrap();
        assert_eq!(editor.view().rows[0].value, "Jean");
    }

    #[test]
    fn test_change_language_needs_session() {
        let mut store = ProvenanceStore::new();
        let mut editor = VersionEditor::new("en");
        assert!(matches!(
            editor.begin_change_language(&mut store, "fr"),
            Err(EditorError::NoSession)
        ));
    }
}
