//! HTTP implementation of the field backend.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::routes::Routes;
use crate::search::{SearchQuery, SearchResults};
use crate::wire;
use serde_json::Value;
use sfm_domain::{
    FieldBackend, FieldKey, LanguageSuggestion, RecordPayload, RecordRef, RevertRequest,
    SaveOutcome, SourceListing, Translation, VersionRecord,
};
use url::Url;

/// Form field carrying the CSRF token on every POST
const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Talks to the records backend over HTTP.
///
/// GETs expect JSON bodies. POSTs are form-encoded, carry the CSRF token
/// and put their JSON document in a single form field, the way the page's
/// scripts have always sent them.
pub struct HttpBackend {
    config: ClientConfig,
    routes: Routes,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend from a configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate().map_err(ClientError::Config)?;

        let routes = Routes::new(&config.base_url, &config.lang)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            routes,
            http,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Route builders in use
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Run a listing search for the page at `page_path` (e.g. `/en/person/`)
    pub async fn search(
        &self,
        page_path: &str,
        query: &SearchQuery,
    ) -> Result<SearchResults, ClientError> {
        let url = self.routes.search(page_path);
        tracing::debug!("GET {} {:?}", url, query.params());

        let response = self.http.get(url).query(query.params()).send().await?;
        let response = check_status(response).await?;
        let body: wire::SearchResponse = response.json().await?;

        Ok(SearchResults::from(body))
    }

    async fn get_json(&self, url: Url) -> Result<Value, ClientError> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post_form(
        &self,
        url: Url,
        field: &str,
        document: String,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!("POST {} ({})", url, field);
        let form = [(CSRF_FIELD, self.config.csrf_token.as_str()), (field, document.as_str())];
        let response = self.http.post(url).form(&form).send().await?;
        check_status(response).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ClientError::Http(format!("HTTP {}: {}", status, error_text)))
}

impl FieldBackend for HttpBackend {
    type Error = ClientError;

    async fn fetch_sources(&self, key: &FieldKey) -> Result<SourceListing, ClientError> {
        let body = self.get_json(self.routes.sources(key)).await?;
        Ok(wire::parse_sources(&body))
    }

    async fn fetch_versions(
        &self,
        key: &FieldKey,
        language: Option<&str>,
    ) -> Result<Vec<VersionRecord>, ClientError> {
        let body = self.get_json(self.routes.versions(key, language)).await?;
        Ok(wire::parse_versions(&body))
    }

    async fn revert_version(
        &self,
        key: &FieldKey,
        request: &RevertRequest,
    ) -> Result<(), ClientError> {
        let document = wire::encode_revert(&request.lang, &request.id);
        self.post_form(self.routes.revert(key), "revert", document)
            .await?;
        tracing::info!("Reverted {} to version {}", key, request.id);
        Ok(())
    }

    async fn fetch_translations(&self, key: &FieldKey) -> Result<Vec<Translation>, ClientError> {
        let body = self.get_json(self.routes.translations(key)).await?;
        Ok(wire::parse_translations(&body))
    }

    async fn add_translation(
        &self,
        key: &FieldKey,
        translation: &Translation,
    ) -> Result<(), ClientError> {
        let document = wire::encode_translation(translation);
        self.post_form(self.routes.add_translation(key), "translation", document)
            .await?;
        tracing::info!("Added {} translation for {}", translation.language, key);
        Ok(())
    }

    async fn autocomplete_languages(
        &self,
        term: &str,
    ) -> Result<Vec<LanguageSuggestion>, ClientError> {
        let url = self.routes.language_autocomplete();
        tracing::debug!("GET {} term={}", url, term);
        let response = self.http.get(url).query(&[("term", term)]).send().await?;
        let body: Value = check_status(response).await?.json().await?;
        Ok(wire::parse_suggestions(&body))
    }

    async fn save_record(
        &self,
        record: &RecordRef,
        payload: &RecordPayload,
    ) -> Result<SaveOutcome, ClientError> {
        let document = serde_json::to_string(&wire::encode_payload(payload))?;
        let response = self
            .post_form(
                self.routes.save(record),
                self.config.save_form_key(&record.record_type),
                document,
            )
            .await?;
        let body: Value = response.json().await?;
        let outcome = wire::parse_save_response(&body)?;

        match &outcome {
            SaveOutcome::Saved { id } => {
                tracing::info!("Saved {} {}", record.record_type, id)
            }
            SaveOutcome::Rejected { errors } => {
                tracing::info!(
                    "Save of {} {} rejected with {} field error(s)",
                    record.record_type,
                    record.record_id,
                    errors.len()
                )
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = HttpBackend::new(ClientConfig::new("ftp://example.org"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_backend_creation() {
        let backend = HttpBackend::new(ClientConfig::new("http://localhost:8000").with_lang("es"))
            .unwrap();
        assert_eq!(backend.routes().lang(), "es");
        assert_eq!(backend.config().timeout_secs, 30);
    }
}
