//! Integration tests for the HTTP backend against a local axum server

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use sfm_client::{ClientConfig, ClientError, HttpBackend, SearchQuery};
use sfm_domain::{
    Confidence, FieldBackend, FieldKey, FieldSubmission, RecordId, RecordPayload, RecordRef,
    RevertRequest, SaveOutcome, SourceId, SubmittedSource, Translation,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

type Posted = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

/// Helper to start the fake backend and return its base URL
async fn spawn_server() -> (String, Posted) {
    let posted: Posted = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/source/:kind/:id/:field", get(sources))
        .route("/version/:kind/:id/:field", get(versions))
        .route("/version/:kind/:id/:field/:lang", get(versions_in_language))
        .route("/translate/languages/autocomplete", get(autocomplete))
        .route("/translate/:kind/:id/:field", get(translations))
        .route("/en/version/revert/:kind/:id/:field/", post(record_post))
        .route("/en/translate/:kind/:id/:field/", post(record_post))
        .route("/en/person/add/", post(save_new))
        .route("/en/person/:id/", post(save_existing))
        .route("/en/person/search/", get(search))
        .route("/slow/translate/:kind/:id/:field", get(slow))
        .route("/broken/source/:kind/:id/:field", get(broken))
        .with_state(posted.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), posted)
}

async fn sources(Path((kind, id, field)): Path<(String, String, String)>) -> Json<Value> {
    if id == "0" {
        return Json(json!([]));
    }
    Json(json!({
        "confidence": "2",
        "sources": [
            {"id": 5, "source": format!("{} {} {}", kind, id, field), "confidence": "3"},
            {"id": "6", "source": "Second report", "confidence": null}
        ]
    }))
}

async fn versions(Path((_, id, _)): Path<(String, String, String)>) -> Json<Value> {
    Json(json!([
        {"id": 12, "value": format!("current of {}", id), "sources": [{"id": 5, "source": "A"}], "lang": "en"},
        {"id": 11, "value": "older", "sources": [], "lang": "en"}
    ]))
}

async fn versions_in_language(
    Path((_, _, _, lang)): Path<(String, String, String, String)>,
) -> Json<Value> {
    Json(json!([{"id": 20, "value": "Jean", "sources": [], "lang": lang}]))
}

async fn translations() -> Json<Value> {
    Json(json!([{"lang": "fr", "value": "Jean"}, {"lang": "es", "value": "Juan"}]))
}

async fn autocomplete(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let term = params.get("term").cloned().unwrap_or_default();
    Json(json!([{"label": format!("{}ench", term), "value": "fr"}]))
}

async fn record_post(
    State(posted): State<Posted>,
    Path(path): Path<Vec<String>>,
    Form(form): Form<HashMap<String, String>>,
) -> StatusCode {
    posted.lock().unwrap().push((path.join("/"), form));
    StatusCode::OK
}

async fn save_new(
    State(posted): State<Posted>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    posted.lock().unwrap().push(("add".to_string(), form));
    Json(json!({"id": 41}))
}

async fn save_existing(
    Path(id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    let document: Value = serde_json::from_str(&form["person"]).unwrap();
    if document["PersonName"]["value"] == "" {
        return Json(json!({"errors": {"PersonName": ["This field is required."]}}));
    }
    Json(json!({"id": id}))
}

async fn search(Query(params): Query<Vec<(String, String)>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "keys": ["name", "order"],
        "objects": [{"id": 1, "name": "Juan", "order": params.iter().find(|(k, _)| k == "order").map(|(_, v)| v.clone())}],
        "paginator": "<ul class=\"pagination\"></ul>",
        "result_number": 1
    }))
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!([]))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

fn key(id: &str) -> FieldKey {
    FieldKey::new(RecordRef::new("person", RecordId::parse(id)), "PersonName")
}

fn backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(ClientConfig::new(base_url).with_csrf_token("token123")).unwrap()
}

#[tokio::test]
async fn test_fetch_sources() {
    let (base, _) = spawn_server().await;
    let listing = backend(&base).fetch_sources(&key("7")).await.unwrap();

    assert_eq!(listing.confidence, Some(Confidence::Medium));
    assert_eq!(listing.sources.len(), 2);
    assert_eq!(listing.sources[0].id, SourceId::Server("5".into()));
    assert_eq!(listing.sources[0].text, "person 7 PersonName");
    assert_eq!(listing.sources[0].confidence, Confidence::High);
    assert_eq!(listing.sources[1].confidence, Confidence::Unset);
}

#[tokio::test]
async fn test_fetch_sources_for_new_record() {
    let (base, _) = spawn_server().await;
    let listing = backend(&base).fetch_sources(&key("")).await.unwrap();
    assert!(listing.sources.is_empty());
    assert!(listing.confidence.is_none());
}

#[tokio::test]
async fn test_fetch_versions() {
    let (base, _) = spawn_server().await;
    let backend = backend(&base);

    let versions = backend.fetch_versions(&key("7"), None).await.unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].value, "current of 7");
    assert_eq!(versions[0].sources[0].text, "A");

    let french = backend.fetch_versions(&key("7"), Some("fr")).await.unwrap();
    assert_eq!(french.len(), 1);
    assert_eq!(french[0].language, "fr");
}

#[tokio::test]
async fn test_revert_posts_form() {
    let (base, posted) = spawn_server().await;
    backend(&base)
        .revert_version(
            &key("7"),
            &RevertRequest {
                lang: "en".into(),
                id: "11".into(),
            },
        )
        .await
        .unwrap();

    let posted = posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    let (path, form) = &posted[0];
    assert_eq!(path, "person/7/PersonName");
    assert_eq!(form["csrfmiddlewaretoken"], "token123");
    let document: Value = serde_json::from_str(&form["revert"]).unwrap();
    assert_eq!(document, json!({"lang": "en", "id": "11"}));
}

#[tokio::test]
async fn test_translations() {
    let (base, posted) = spawn_server().await;
    let backend = backend(&base);

    let translations = backend.fetch_translations(&key("7")).await.unwrap();
    assert_eq!(translations[0], Translation::new("fr", "Jean"));

    backend
        .add_translation(&key("7"), &Translation::new("de", "Johann"))
        .await
        .unwrap();
    let posted = posted.lock().unwrap();
    let document: Value = serde_json::from_str(&posted[0].1["translation"]).unwrap();
    assert_eq!(document, json!({"value": "Johann", "lang": "de"}));
}

#[tokio::test]
async fn test_autocomplete_languages() {
    let (base, _) = spawn_server().await;
    let suggestions = backend(&base).autocomplete_languages("Fr").await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].label, "French");
    assert_eq!(suggestions[0].value, "fr");
}

fn payload(record: RecordRef, value: &str) -> RecordPayload {
    let mut payload = RecordPayload::new(record);
    payload.fields.push((
        "PersonName".into(),
        FieldSubmission {
            value: Some(value.into()),
            sources: vec![SubmittedSource {
                id: None,
                text: "Report".into(),
                confidence: Confidence::Low,
            }],
            confidence: Confidence::High,
            translations: vec![],
        },
    ));
    payload
}

#[tokio::test]
async fn test_save_new_record() {
    let (base, posted) = spawn_server().await;
    let record = RecordRef::new("person", RecordId::New);

    let outcome = backend(&base)
        .save_record(&record, &payload(record.clone(), "Juan"))
        .await
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { id: "41".into() });

    let posted = posted.lock().unwrap();
    let form = &posted[0].1;
    assert_eq!(form["csrfmiddlewaretoken"], "token123");
    let document: Value = serde_json::from_str(&form["person"]).unwrap();
    assert_eq!(document["PersonName"]["sources"][0]["id"], 0);
    assert_eq!(document["PersonName"]["confidence"], "3");
}

#[tokio::test]
async fn test_save_under_configured_form_key() {
    let (base, posted) = spawn_server().await;
    let backend = HttpBackend::new(
        ClientConfig::new(&base)
            .with_csrf_token("token123")
            .with_save_form_key("object"),
    )
    .unwrap();
    let record = RecordRef::new("person", RecordId::New);

    backend
        .save_record(&record, &payload(record.clone(), "Juan"))
        .await
        .unwrap();

    let posted = posted.lock().unwrap();
    let form = &posted[0].1;
    assert!(!form.contains_key("person"));
    let document: Value = serde_json::from_str(&form["object"]).unwrap();
    assert_eq!(document["PersonName"]["value"], "Juan");
}

#[tokio::test]
async fn test_save_rejected() {
    let (base, _) = spawn_server().await;
    let record = RecordRef::new("person", RecordId::parse("7"));

    let outcome = backend(&base)
        .save_record(&record, &payload(record.clone(), ""))
        .await
        .unwrap();
    match outcome {
        SaveOutcome::Rejected { errors } => {
            assert_eq!(errors["PersonName"], "This field is required.");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search() {
    let (base, _) = spawn_server().await;
    let mut query = SearchQuery::from_fragment("#name=Juan");
    query.toggle_order("name");

    let results = backend(&base).search("/en/person/", &query).await.unwrap();
    assert!(results.success);
    assert_eq!(results.result_number, "1");
    assert_eq!(results.rows(), vec![vec!["Juan".to_string(), "DESC".to_string()]]);
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let (base, _) = spawn_server().await;
    let backend = backend(&format!("{}/broken", base));
    let result = backend.fetch_sources(&key("7")).await;
    match result {
        Err(ClientError::Http(message)) => assert!(message.contains("500")),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout() {
    let (base, _) = spawn_server().await;
    let slow = HttpBackend::new(ClientConfig::new(format!("{}/slow", base)).with_timeout_secs(1))
        .unwrap();
    let result = slow.fetch_translations(&key("7")).await;
    assert!(matches!(result, Err(ClientError::Timeout)));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = backend(&format!("http://{}", addr))
        .fetch_sources(&key("7"))
        .await;
    assert!(matches!(result, Err(ClientError::Connection(_))));
}
