//! Wire formats of the records backend.
//!
//! Responses have drifted over the life of the backend: the sources
//! endpoint answers either with a bare array or with an object wrapping
//! `sources`, confidence codes come as strings or numbers, ids as strings or
//! numbers. Parsing goes through `serde_json::Value` and keeps whatever is
//! usable instead of failing on the first surprise; a response that yields
//! nothing usable becomes an empty list.

use crate::error::ClientError;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sfm_domain::{
    Confidence, FieldSubmission, LanguageSuggestion, RecordPayload, SaveOutcome, SourceCitation,
    SourceId, SourceListing, Translation, VersionRecord,
};
use std::collections::BTreeMap;

/// Id written for citations the server has not seen yet
pub const NEW_SOURCE_ID: i64 = 0;

/// Parse a sources response (array or `{sources, confidence}` object)
pub fn parse_sources(value: &Value) -> SourceListing {
    match value {
        Value::Array(items) => SourceListing {
            sources: items.iter().filter_map(parse_citation).collect(),
            confidence: None,
        },
        Value::Object(map) => SourceListing {
            sources: map
                .get("sources")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(parse_citation).collect())
                .unwrap_or_default(),
            confidence: map.get("confidence").map(parse_confidence),
        },
        _ => SourceListing::default(),
    }
}

/// Parse one citation. Items without any text are dropped.
fn parse_citation(value: &Value) -> Option<SourceCitation> {
    match value {
        Value::Object(map) => {
            let text = map
                .get("source")
                .or_else(|| map.get("text"))
                .and_then(scalar_to_string)?;
            let id = map.get("id").and_then(scalar_to_string).unwrap_or_default();
            let confidence = map
                .get("confidence")
                .map(parse_confidence)
                .unwrap_or_default();
            Some(SourceCitation::new(SourceId::Server(id), text, confidence))
        }
        Value::String(text) => Some(SourceCitation::new(
            SourceId::Server(String::new()),
            text.clone(),
            Confidence::Unset,
        )),
        _ => None,
    }
}

/// Confidence code given as a string, a number or null
pub fn parse_confidence(value: &Value) -> Confidence {
    match value {
        Value::String(code) => Confidence::from_code(code),
        Value::Number(n) => n.as_i64().map(Confidence::from_number).unwrap_or_default(),
        _ => Confidence::Unset,
    }
}

/// Parse a versions response
pub fn parse_versions(value: &Value) -> Vec<VersionRecord> {
    list_items(value, "versions")
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let sources = match map.get("sources") {
                Some(Value::Array(items)) => items.iter().filter_map(parse_citation).collect(),
                Some(other) => parse_citation(other).into_iter().collect(),
                None => Vec::new(),
            };
            Some(VersionRecord {
                id: map.get("id").and_then(scalar_to_string).unwrap_or_default(),
                value: map.get("value").and_then(scalar_to_string).unwrap_or_default(),
                sources,
                language: map
                    .get("lang")
                    .or_else(|| map.get("language"))
                    .and_then(scalar_to_string)
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Parse a translations response
pub fn parse_translations(value: &Value) -> Vec<Translation> {
    list_items(value, "translations")
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let language = map
                .get("lang")
                .or_else(|| map.get("language"))
                .and_then(scalar_to_string)?;
            let value = map.get("value").and_then(scalar_to_string).unwrap_or_default();
            Some(Translation::new(language, value))
        })
        .collect()
}

/// Parse an autocomplete response: strings or `{label, value}` objects
pub fn parse_suggestions(value: &Value) -> Vec<LanguageSuggestion> {
    list_items(value, "results")
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(LanguageSuggestion {
                label: s.clone(),
                value: s.clone(),
            }),
            Value::Object(map) => {
                let label = map.get("label").and_then(scalar_to_string);
                let value = map.get("value").and_then(scalar_to_string);
                match (label, value) {
                    (Some(label), Some(value)) => Some(LanguageSuggestion { label, value }),
                    (Some(one), None) | (None, Some(one)) => Some(LanguageSuggestion {
                        label: one.clone(),
                        value: one,
                    }),
                    (None, None) => None,
                }
            }
            _ => None,
        })
        .collect()
}

/// Parse the answer to a save
pub fn parse_save_response(value: &Value) -> Result<SaveOutcome, ClientError> {
    let map = value
        .as_object()
        .ok_or_else(|| ClientError::UnexpectedResponse("save response is not an object".into()))?;

    if let Some(errors) = map.get("errors").and_then(Value::as_object) {
        let errors: BTreeMap<String, String> = errors
            .iter()
            .map(|(field, message)| (field.clone(), error_message(message)))
            .collect();
        return Ok(SaveOutcome::Rejected { errors });
    }

    map.get("id")
        .and_then(scalar_to_string)
        .filter(|id| !id.is_empty())
        .map(|id| SaveOutcome::Saved { id })
        .ok_or_else(|| ClientError::UnexpectedResponse("save response has neither id nor errors".into()))
}

/// Django form errors come as a string or a list of strings
fn error_message(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(" "),
        other => scalar_to_string(other).unwrap_or_default(),
    }
}

/// JSON document posted under the record type key on save
pub fn encode_payload(payload: &RecordPayload) -> Value {
    let fields: Map<String, Value> = payload
        .fields
        .iter()
        .map(|(name, field)| (name.clone(), encode_field(field)))
        .collect();
    Value::Object(fields)
}

fn encode_field(field: &FieldSubmission) -> Value {
    let sources: Vec<Value> = field
        .sources
        .iter()
        .map(|s| {
            json!({
                "id": s.id.as_deref().map(Value::from).unwrap_or_else(|| Value::from(NEW_SOURCE_ID)),
                "source": s.text,
                "confidence": s.confidence.code(),
            })
        })
        .collect();

    let mut out = json!({
        "sources": sources,
        "confidence": field.confidence.code(),
    });
    if let Some(value) = &field.value {
        out["value"] = Value::from(value.as_str());
    }
    if !field.translations.is_empty() {
        out["translations"] = field
            .translations
            .iter()
            .map(|t| json!({ "lang": t.language, "value": t.value }))
            .collect::<Vec<_>>()
            .into();
    }
    out
}

/// JSON document posted under `revert`
pub fn encode_revert(lang: &str, id: &str) -> String {
    json!({ "lang": lang, "id": id }).to_string()
}

/// JSON document posted under `translation`
pub fn encode_translation(translation: &Translation) -> String {
    json!({ "value": translation.value, "lang": translation.language }).to_string()
}

/// Search endpoint response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Whether the query ran
    #[serde(default)]
    pub success: bool,
    /// Result objects, one JSON object per row
    #[serde(default)]
    pub objects: Vec<Map<String, Value>>,
    /// Column keys in display order
    #[serde(default)]
    pub keys: Vec<String>,
    /// Pre-rendered paginator HTML
    #[serde(default)]
    pub paginator: String,
    /// Result count, number or preformatted text
    #[serde(default)]
    pub result_number: Value,
}

fn list_items<'a>(value: &'a Value, wrapper: &str) -> &'a [Value] {
    match value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .get(wrapper)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// String, number or bool as text; null and containers are not scalars
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
