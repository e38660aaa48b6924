//! Saving a record with the provenance of all of its fields
//!
//! The payload is built from a snapshot of the store and the page inputs;
//! the store itself is never modified by a save. After a successful save
//! the page navigates away, which discards the page-scoped store.

use crate::error::{EditorError, Result};
use sfm_domain::{
    FieldBackend, FieldSubmission, Page, ProvenanceStore, RecordId, RecordPayload, RecordRef,
    SaveOutcome, SourceId, SubmittedSource, TEMPORARY_ID_PREFIX,
};
use url::Url;

/// Marker written before every inline error message
const ERROR_MARKER: &str = "* ";

/// Collect the payload for `record` from the store and the page inputs.
///
/// Fields appear in first-access order. Citations with client-side ids (and
/// citations the server sent without an id) go out without an id so the
/// server creates them. A field with no input on the page is sent without a
/// value, leaving the stored value alone.
pub fn build_payload<P: Page>(
    store: &ProvenanceStore,
    page: &P,
    record: &RecordRef,
) -> RecordPayload {
    let mut payload = RecordPayload::new(record.clone());
    for (key, entry) in store.record_entries(record) {
        let sources = entry
            .sources
            .iter()
            .map(|citation| SubmittedSource {
                id: match &citation.id {
                    SourceId::Server(id)
                        if !id.is_empty() && !id.starts_with(TEMPORARY_ID_PREFIX) =>
                    {
                        Some(id.clone())
                    }
                    _ => None,
                },
                text: citation.text.clone(),
                confidence: citation.confidence,
            })
            .collect();

        payload.fields.push((
            key.field_name.clone(),
            FieldSubmission {
                value: page.field_value(&key.field_name),
                sources,
                confidence: entry.confidence,
                translations: entry.translations.clone(),
            },
        ));
    }
    payload
}

/// Save `record` and update the page with the outcome.
///
/// A saved record sends the page to its new location. A rejected save
/// writes each field error next to its input and stays on the page.
pub async fn submit<B: FieldBackend, P: Page>(
    store: &ProvenanceStore,
    backend: &B,
    page: &mut P,
    record: &RecordRef,
) -> Result<SaveOutcome> {
    let payload = build_payload(store, page, record);
    tracing::debug!(
        "Saving {} {} with {} field(s)",
        record.record_type,
        record.record_id,
        payload.fields.len()
    );

    let outcome = backend.save_record(record, &payload).await.map_err(|e| {
        tracing::warn!("Failed to save {} {}: {}", record.record_type, record.record_id, e);
        EditorError::backend(e)
    })?;

    page.clear_field_errors();
    match &outcome {
        SaveOutcome::Saved { id } => {
            let url = success_url(&page.current_url(), record, id);
            tracing::info!("Saved {} {}, navigating to {}", record.record_type, id, url);
            page.navigate(&url);
        }
        SaveOutcome::Rejected { errors } => {
            for (field, message) in errors {
                page.show_field_error(field, &format!("{}{}", ERROR_MARKER, message));
            }
        }
    }
    Ok(outcome)
}

/// Where to go after a successful save.
///
/// A new record's `add` segment becomes the returned id; an existing
/// record's id segment is dropped, leading back to the listing.
pub fn success_url(current: &str, record: &RecordRef, saved_id: &str) -> String {
    if saved_id.is_empty() {
        return current.to_string();
    }
    let (target, replacement) = match record.record_id {
        RecordId::New => ("add", Some(saved_id)),
        RecordId::Persisted(_) => (saved_id, None),
    };

    let Ok(mut url) = Url::parse(current) else {
        return rewrite_text(current, target, replacement);
    };
    let Some(segments) = url.path_segments() else {
        return rewrite_text(current, target, replacement);
    };

    let mut segments: Vec<String> = segments.map(str::to_string).collect();
    rewrite_segments(&mut segments, target, replacement);

    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(&segments);
    }
    url.to_string()
}

/// Replace or drop the last path segment equal to `target`
fn rewrite_segments(segments: &mut Vec<String>, target: &str, replacement: Option<&str>) {
    if let Some(pos) = segments.iter().rposition(|s| s == target) {
        match replacement {
            Some(id) => segments[pos] = id.to_string(),
            None => {
                segments.remove(pos);
            }
        }
    }
}

/// Same rewrite for locations that do not parse as absolute URLs.
/// Only the path is touched; query and fragment are carried over as is.
fn rewrite_text(current: &str, target: &str, replacement: Option<&str>) -> String {
    let end = current.find(['?', '#']).unwrap_or(current.len());
    let (path, rest) = current.split_at(end);
    let mut segments: Vec<String> = path.split('/').map(str::to_string).collect();
    rewrite_segments(&mut segments, target, replacement);
    format!("{}{}", segments.join("/"), rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sfm_domain::{Confidence, FieldKey, SourceCitation};
    use std::collections::HashMap;

    fn new_record() -> RecordRef {
        RecordRef::new("person", RecordId::New)
    }

    fn existing(id: &str) -> RecordRef {
        RecordRef::new("person", RecordId::parse(id))
    }

    #[test]
    fn test_success_url_for_new_record() {
        assert_eq!(
            success_url("http://sfm.test/en/person/add/", &new_record(), "41"),
            "http://sfm.test/en/person/41/"
        );
    }

    #[test]
    fn test_success_url_for_update() {
        assert_eq!(
            success_url("http://sfm.test/en/person/7/", &existing("7"), "7"),
            "http://sfm.test/en/person/"
        );
    }

    #[test]
    fn test_success_url_keeps_query() {
        assert_eq!(
            success_url("http://sfm.test/en/person/add/?tab=2", &new_record(), "41"),
            "http://sfm.test/en/person/41/?tab=2"
        );
    }

    #[test]
    fn test_success_url_without_match_is_unchanged() {
        assert_eq!(
            success_url("http://sfm.test/en/person/edit/", &existing("7"), "7"),
            "http://sfm.test/en/person/edit/"
        );
    }

    #[test]
    fn test_success_url_for_relative_location() {
        assert_eq!(success_url("/en/person/add/", &new_record(), "41"), "/en/person/41/");
        assert_eq!(success_url("/en/person/7/", &existing("7"), "7"), "/en/person/");
    }

    #[test]
    fn test_relative_location_leaves_query_alone() {
        assert_eq!(
            success_url("/en/person/add/?from=address", &new_record(), "41"),
            "/en/person/41/?from=address"
        );
        assert_eq!(
            success_url("/en/person/7/?tab=17/", &existing("7"), "7"),
            "/en/person/?tab=17/"
        );
        assert_eq!(
            success_url("/en/person/7/#add", &existing("7"), "7"),
            "/en/person/#add"
        );
    }

    #[test]
    fn test_success_url_without_id_is_unchanged() {
        assert_eq!(
            success_url("http://sfm.test/en/person/add/", &new_record(), ""),
            "http://sfm.test/en/person/add/"
        );
    }

    #[derive(Default)]
    struct FormPage {
        inputs: HashMap<String, String>,
    }

    impl Page for FormPage {
        fn field_value(&self, field_name: &str) -> Option<String> {
            self.inputs.get(field_name).cloned()
        }
        fn current_url(&self) -> String {
            "http://sfm.test/en/person/7/".to_string()
        }
        fn clear_field_errors(&mut self) {}
        fn show_field_error(&mut self, _field_name: &str, _message: &str) {}
        fn navigate(&mut self, _url: &str) {}
        fn reload(&mut self) {}
    }

    fn field(record: &RecordRef, name: &str) -> FieldKey {
        FieldKey::new(record.clone(), name)
    }

    #[test]
    fn test_underscore_ids_never_reach_the_payload() {
        let record = existing("7");
        let mut store = ProvenanceStore::new();
        let entry = store.get(&field(&record, "PersonName"));
        for raw in ["_x", "_", "_3", "5"] {
            entry.add_source(SourceCitation::new(
                SourceId::parse(raw),
                raw,
                Confidence::Low,
            ));
        }

        let payload = build_payload(&store, &FormPage::default(), &record);
        let ids: Vec<Option<&str>> = payload
            .field("PersonName")
            .unwrap()
            .sources
            .iter()
            .map(|s| s.id.as_deref())
            .collect();
        assert_eq!(ids, vec![None, None, None, Some("5")]);
    }

    #[test]
    fn test_field_without_input_has_no_value() {
        let record = existing("7");
        let mut store = ProvenanceStore::new();
        store.get(&field(&record, "PersonName"));
        store.get(&field(&record, "PersonAlias"));

        let mut page = FormPage::default();
        page.inputs.insert("PersonName".into(), "Juan".into());

        let payload = build_payload(&store, &page, &record);
        assert_eq!(
            payload.field("PersonName").unwrap().value.as_deref(),
            Some("Juan")
        );
        assert_eq!(payload.field("PersonAlias").unwrap().value, None);
    }

    proptest! {
        #[test]
        fn prop_new_record_url_carries_id(id in "[1-9][0-9]{0,6}", kind in "[a-z]{3,12}") {
            let current = format!("http://sfm.test/en/{}/add/", kind);
            let url = success_url(&current, &RecordRef::new(kind.clone(), RecordId::New), &id);
            prop_assert_eq!(url, format!("http://sfm.test/en/{}/{}/", kind, id));
        }

        #[test]
        fn prop_update_url_drops_id(id in "[1-9][0-9]{0,6}", kind in "[a-z]{3,12}") {
            let current = format!("http://sfm.test/en/{}/{}/", kind, id);
            let record = RecordRef::new(kind.clone(), RecordId::parse(&id));
            let url = success_url(&current, &record, &id);
            prop_assert_eq!(url, format!("http://sfm.test/en/{}/", kind));
        }
    }
}
