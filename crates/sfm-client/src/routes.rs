//! URL builders for the backend endpoints

use crate::error::ClientError;
use sfm_domain::{FieldKey, RecordRef};
use url::Url;

/// Builds endpoint URLs against a base URL and a language prefix.
///
/// Lookups (`/source`, `/version`, `/translate`) are not language-prefixed;
/// every state-changing endpoint is.
#[derive(Debug, Clone)]
pub struct Routes {
    base: Url,
    lang: String,
}

impl Routes {
    /// Create route builders. Fails if `base_url` cannot carry a path.
    pub fn new(base_url: &str, lang: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL cannot carry a path: {}",
                base_url
            )));
        }
        Ok(Self {
            base,
            lang: lang.to_string(),
        })
    }

    /// Language prefix
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// `GET /source/{type}/{id}/{field}`
    pub fn sources(&self, key: &FieldKey) -> Url {
        self.join(&field_segments("source", key), false)
    }

    /// `GET /version/{type}/{id}/{field}[/{lang}]`
    pub fn versions(&self, key: &FieldKey, language: Option<&str>) -> Url {
        let mut segments = field_segments("version", key);
        if let Some(language) = language.filter(|l| !l.is_empty()) {
            segments.push(language);
        }
        self.join(&segments, false)
    }

    /// `POST /{lang}/version/revert/{type}/{id}/{field}/`
    pub fn revert(&self, key: &FieldKey) -> Url {
        let mut segments = vec![self.lang.as_str(), "version", "revert"];
        segments.extend(key_segments(key));
        self.join(&segments, true)
    }

    /// `GET /translate/{type}/{id}/{field}`
    pub fn translations(&self, key: &FieldKey) -> Url {
        self.join(&field_segments("translate", key), false)
    }

    /// `POST /{lang}/translate/{type}/{id}/{field}/`
    pub fn add_translation(&self, key: &FieldKey) -> Url {
        let mut segments = vec![self.lang.as_str(), "translate"];
        segments.extend(key_segments(key));
        self.join(&segments, true)
    }

    /// `GET /translate/languages/autocomplete`
    pub fn language_autocomplete(&self) -> Url {
        self.join(&["translate", "languages", "autocomplete"], false)
    }

    /// `POST /{lang}/{type}/{idOrAdd}/`
    pub fn save(&self, record: &RecordRef) -> Url {
        self.join(
            &[
                self.lang.as_str(),
                record.record_type.as_str(),
                record.record_id.save_segment(),
            ],
            true,
        )
    }

    /// `GET {path}search/` for a listing page path such as `/en/person/`
    pub fn search(&self, page_path: &str) -> Url {
        let mut segments: Vec<&str> = page_path.split('/').filter(|s| !s.is_empty()).collect();
        segments.push("search");
        self.join(&segments, true)
    }

    fn join(&self, segments: &[&str], trailing_slash: bool) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        url
    }
}

fn key_segments(key: &FieldKey) -> [&str; 3] {
    [
        key.record_type(),
        key.record_id().path_segment(),
        key.field_name.as_str(),
    ]
}

fn field_segments<'a>(prefix: &'a str, key: &'a FieldKey) -> Vec<&'a str> {
    let mut segments = vec![prefix];
    segments.extend(key_segments(key));
    segments
}
